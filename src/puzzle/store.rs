//! Puzzle persistence, keyed by date.
//!
//! A store holds at most one puzzle per date; inserting a second one for the
//! same date fails with [`StoreError::DuplicateDate`]. [`generate_for_date`]
//! is the idempotent driver on top: it skips dates that already have a puzzle
//! and treats a lost insert race the same way.

use super::assembler::PuzzleGenerator;
use super::types::Puzzle;
use crate::error::{PuzzleError, StoreError};
use fd_lock::RwLock;
use rand::Rng;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use time::Date;

/// Date-keyed puzzle storage.
pub trait PuzzleStore {
    /// Whether a puzzle exists for `date`.
    fn exists(&self, date: Date) -> Result<bool, StoreError> {
        Ok(self.get(date)?.is_some())
    }

    /// The puzzle for `date`, if any.
    fn get(&self, date: Date) -> Result<Option<Puzzle>, StoreError>;

    /// Store a new puzzle. Fails if its date is taken.
    fn insert(&mut self, puzzle: Puzzle) -> Result<(), StoreError>;
}

/// Volatile store for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    puzzles: BTreeMap<Date, Puzzle>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored puzzles.
    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }
}

impl PuzzleStore for MemoryStore {
    fn get(&self, date: Date) -> Result<Option<Puzzle>, StoreError> {
        Ok(self.puzzles.get(&date).cloned())
    }

    fn insert(&mut self, puzzle: Puzzle) -> Result<(), StoreError> {
        if self.puzzles.contains_key(&puzzle.date) {
            return Err(StoreError::DuplicateDate(puzzle.date));
        }
        self.puzzles.insert(puzzle.date, puzzle);
        Ok(())
    }
}

/// Store backed by a JSON array of puzzles on disk.
///
/// The file is rewritten in full on every insert, via a sibling temp file and
/// a rename, so a crash mid-write leaves the previous contents intact.
///
/// Inserts hold an exclusive lock on a sibling `.lock` file and reload the
/// array before checking the date, so several stores (or processes) sharing
/// one path never overwrite each other's puzzles. Reads serve the snapshot
/// from the last open or insert.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    puzzles: BTreeMap<Date, Puzzle>,
}

impl JsonFileStore {
    /// Open `path`, starting empty if it does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let puzzles = load(&path)?;
        log::debug!("opened {} with {} puzzle(s)", path.display(), puzzles.len());
        Ok(Self { path, puzzles })
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of stored puzzles.
    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    /// Re-read the backing file, picking up puzzles other writers stored.
    pub fn refresh(&mut self) -> Result<(), StoreError> {
        self.puzzles = load(&self.path)?;
        Ok(())
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("json.lock")
    }

    fn save(&self) -> Result<(), StoreError> {
        let list: Vec<&Puzzle> = self.puzzles.values().collect();
        let json = serde_json::to_string_pretty(&list)?;
        let tmp = self.path.with_extension("json.tmp");
        let io_err = |source: std::io::Error| StoreError::Io { path: tmp.clone(), source };

        let mut file = File::create(&tmp).map_err(io_err)?;
        file.write_all(json.as_bytes()).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        drop(file);

        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

fn load(path: &Path) -> Result<BTreeMap<Date, Puzzle>, StoreError> {
    match fs::read_to_string(path) {
        Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
        Ok(text) => {
            let list: Vec<Puzzle> = serde_json::from_str(&text)?;
            Ok(list.into_iter().map(|p| (p.date, p)).collect())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(source) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

impl PuzzleStore for JsonFileStore {
    fn get(&self, date: Date) -> Result<Option<Puzzle>, StoreError> {
        Ok(self.puzzles.get(&date).cloned())
    }

    fn insert(&mut self, puzzle: Puzzle) -> Result<(), StoreError> {
        let lock_path = self.lock_path();
        let io_err = |source: std::io::Error| StoreError::Io {
            path: lock_path.clone(),
            source,
        };
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(io_err)?;
        let mut lock = RwLock::new(lock_file);
        let _guard = lock.write().map_err(io_err)?;

        self.refresh()?;
        let date = puzzle.date;
        if self.puzzles.contains_key(&date) {
            return Err(StoreError::DuplicateDate(date));
        }
        self.puzzles.insert(date, puzzle);
        if let Err(e) = self.save() {
            self.puzzles.remove(&date);
            return Err(e);
        }
        Ok(())
    }
}

/// What [`generate_for_date`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// A new puzzle was generated and stored.
    Created(Puzzle),
    /// The date already had a puzzle; nothing changed.
    AlreadyExists,
}

/// Generate and store the puzzle for `date` unless one already exists.
pub fn generate_for_date<S, R>(
    store: &mut S,
    generator: &mut PuzzleGenerator,
    date: Date,
    rng: &mut R,
) -> Result<GenerationOutcome, PuzzleError>
where
    S: PuzzleStore + ?Sized,
    R: Rng + ?Sized,
{
    if store.exists(date)? {
        log::info!("{}: puzzle already exists, skipping", date);
        return Ok(GenerationOutcome::AlreadyExists);
    }

    let puzzle = generator.generate(date, rng)?;

    match store.insert(puzzle.clone()) {
        Ok(()) => Ok(GenerationOutcome::Created(puzzle)),
        Err(StoreError::DuplicateDate(_)) => {
            log::info!("{}: puzzle stored concurrently, discarding ours", date);
            Ok(GenerationOutcome::AlreadyExists)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::equity::EquityMethod;
    use crate::error::GenerationError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use time::macros::date;

    fn generator() -> PuzzleGenerator {
        PuzzleGenerator::new(
            GeneratorConfig::default()
                .with_equity(EquityMethod::MonteCarlo { iterations: 2_000 })
                .with_seed(5),
        )
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("holdemle-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_generation_is_idempotent() {
        let mut store = MemoryStore::new();
        let mut generator = generator();
        let mut rng = StdRng::seed_from_u64(5);
        let d = date!(2025 - 02 - 10);

        let first = generate_for_date(&mut store, &mut generator, d, &mut rng).unwrap();
        let stored = match first {
            GenerationOutcome::Created(p) => p,
            other => panic!("expected a new puzzle, got {:?}", other),
        };
        let second = generate_for_date(&mut store, &mut generator, d, &mut rng).unwrap();

        assert_eq!(second, GenerationOutcome::AlreadyExists);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(d).unwrap(), Some(stored));
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(6);
        let puzzle = generator().generate(date!(2025 - 02 - 11), &mut rng).unwrap();
        store.insert(puzzle.clone()).unwrap();
        assert!(matches!(store.insert(puzzle), Err(StoreError::DuplicateDate(_))));
    }

    #[test]
    fn test_generation_failure_stores_nothing() {
        let mut store = MemoryStore::new();
        let mut generator = PuzzleGenerator::new(
            GeneratorConfig::default()
                .with_equity(EquityMethod::MonteCarlo { iterations: 100 })
                .with_fairness(24.9, 25.1)
                .with_max_puzzle_attempts(3),
        );
        let result = generate_for_date(&mut store, &mut generator, date!(2025 - 02 - 12), &mut StdRng::seed_from_u64(7));
        assert!(matches!(
            result,
            Err(PuzzleError::Generation(GenerationError::FairnessGate { attempts: 3, .. }))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_json_store_round_trips_through_disk() {
        let path = temp_path("store");
        remove_store_files(&path);
        let d = date!(2025 - 02 - 13);

        let mut store = JsonFileStore::open(&path).unwrap();
        assert!(store.is_empty());
        let mut rng = StdRng::seed_from_u64(8);
        let outcome = generate_for_date(&mut store, &mut generator(), d, &mut rng).unwrap();
        assert!(matches!(outcome, GenerationOutcome::Created(_)));

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 1);
        assert!(reopened.exists(d).unwrap());
        assert_eq!(reopened.get(d).unwrap(), store.get(d).unwrap());

        remove_store_files(&path);
    }

    fn remove_store_files(path: &Path) {
        for p in [path.to_path_buf(), path.with_extension("json.lock")] {
            let _ = fs::remove_file(p);
        }
    }

    #[test]
    fn test_two_json_stores_keep_each_others_dates() {
        let path = temp_path("shared");
        remove_store_files(&path);
        let mut generator = generator();
        let mut rng = StdRng::seed_from_u64(9);
        let jan1 = generator.generate(date!(2025 - 01 - 01), &mut rng).unwrap();
        let jan2 = generator.generate(date!(2025 - 01 - 02), &mut rng).unwrap();

        let mut a = JsonFileStore::open(&path).unwrap();
        let mut b = JsonFileStore::open(&path).unwrap();
        a.insert(jan1.clone()).unwrap();
        b.insert(jan2.clone()).unwrap();

        let stored = JsonFileStore::open(&path).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored.get(jan1.date).unwrap(), Some(jan1));
        assert_eq!(stored.get(jan2.date).unwrap(), Some(jan2));

        remove_store_files(&path);
    }

    #[test]
    fn test_two_json_stores_cannot_both_claim_a_date() {
        let path = temp_path("race");
        remove_store_files(&path);
        let d = date!(2025 - 01 - 03);
        let mut generator = generator();
        let first = generator.generate(d, &mut StdRng::seed_from_u64(10)).unwrap();
        let second = generator.generate(d, &mut StdRng::seed_from_u64(11)).unwrap();

        let mut a = JsonFileStore::open(&path).unwrap();
        let mut b = JsonFileStore::open(&path).unwrap();
        a.insert(first.clone()).unwrap();
        assert!(matches!(b.insert(second), Err(StoreError::DuplicateDate(date)) if date == d));
        assert_eq!(b.get(d).unwrap(), Some(first.clone()));

        let stored = JsonFileStore::open(&path).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored.get(d).unwrap(), Some(first));

        remove_store_files(&path);
    }

    #[test]
    fn test_stale_store_reports_already_exists() {
        let path = temp_path("stale");
        remove_store_files(&path);
        let d = date!(2025 - 01 - 04);

        let mut stale = JsonFileStore::open(&path).unwrap();
        let mut fresh = JsonFileStore::open(&path).unwrap();
        let created = generate_for_date(&mut fresh, &mut generator(), d, &mut StdRng::seed_from_u64(12)).unwrap();
        let puzzle = match created {
            GenerationOutcome::Created(p) => p,
            other => panic!("expected a new puzzle, got {:?}", other),
        };

        let outcome = generate_for_date(&mut stale, &mut generator(), d, &mut StdRng::seed_from_u64(13)).unwrap();
        assert_eq!(outcome, GenerationOutcome::AlreadyExists);
        assert_eq!(JsonFileStore::open(&path).unwrap().get(d).unwrap(), Some(puzzle));

        remove_store_files(&path);
    }

    #[test]
    fn test_json_store_rejects_garbage() {
        let path = temp_path("garbage");
        fs::write(&path, "{ not puzzles").unwrap();
        assert!(matches!(JsonFileStore::open(&path), Err(StoreError::Serde(_))));
        fs::remove_file(&path).unwrap();
    }
}
