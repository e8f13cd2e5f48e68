//! Spoiler-free result summary for sharing.

use super::submission::GuessHistory;
use super::Feedback;
use crate::equity::NUM_HANDS;
use time::Date;

/// Link used when no site URL is configured.
pub const DEFAULT_APP_URL: &str = "https://holdemle.vercel.app";

/// Render a history as share text.
///
/// ```text
/// Hold'emle
/// 2026-02-11
/// I Won, using 2/3 guesses.
/// 🟦🟩🟧🟧
/// 🟩🟩🟩🟩
///
/// Visit https://holdemle.vercel.app/ for daily poker puzzles!
/// ```
///
/// Each row lists positions 1 to 4 in order regardless of submission order.
pub fn format_share_text(history: &GuessHistory, date: Date, app_url: Option<&str>) -> String {
    let mut lines = vec![
        "Hold'emle".to_string(),
        date.to_string(),
        format!(
            "I {}, using {}/{} guesses.",
            if history.is_solved() { "Won" } else { "Lost" },
            history.guesses_used(),
            history.rules().max_attempts
        ),
    ];

    for attempt in history.attempts() {
        let mut row = [Feedback::Exact; NUM_HANDS];
        for guess in &attempt.guesses {
            if let Some(slot) = row.get_mut((guess.position as usize).wrapping_sub(1)) {
                *slot = guess.feedback;
            }
        }
        lines.push(row.iter().map(|f| f.emoji()).collect());
    }

    let url = app_url.unwrap_or(DEFAULT_APP_URL).trim_end_matches('/');
    lines.push(String::new());
    lines.push(format!("Visit {}/ for daily poker puzzles!", url));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameRules;
    use crate::puzzle::Puzzle;
    use crate::scoring::Guess;
    use time::macros::date;

    fn puzzle() -> Puzzle {
        let hands = ["AsKh", "QdQc", "JhJs", "9c9d"].map(|h| h.parse().unwrap());
        Puzzle::new(date!(2026 - 02 - 11), hands, [30, 38, 17, 15])
    }

    #[test]
    fn test_won_in_two() {
        let p = puzzle();
        let mut history = GuessHistory::new(GameRules::default());
        let first = vec![Guess::new(3, 16), Guess::new(1, 31), Guess::new(2, 38), Guess::new(4, 15)];
        history.submit(&p, &first, 10.0).unwrap();
        let second = vec![Guess::new(1, 30), Guess::new(2, 38), Guess::new(3, 17), Guess::new(4, 15)];
        history.submit(&p, &second, 20.0).unwrap();

        let text = format_share_text(&history, p.date, None);
        assert_eq!(
            text,
            "Hold'emle\n2026-02-11\nI Won, using 2/3 guesses.\n🟦🟩🟧🟩\n🟩🟩🟩🟩\n\n\
             Visit https://holdemle.vercel.app/ for daily poker puzzles!"
        );
    }

    #[test]
    fn test_lost_with_custom_url() {
        let p = puzzle();
        let mut history = GuessHistory::new(GameRules::default().with_max_attempts(1));
        let guess = vec![Guess::new(1, 25), Guess::new(2, 25), Guess::new(3, 25), Guess::new(4, 25)];
        history.submit(&p, &guess, 10.0).unwrap();

        let text = format_share_text(&history, p.date, Some("https://example.org/"));
        assert!(text.contains("I Lost, using 1/1 guesses."));
        assert!(text.contains("🟧🟧🟦🟦"));
        assert!(text.ends_with("Visit https://example.org/ for daily poker puzzles!"));
        assert!(!text.contains("30"));
    }
}
