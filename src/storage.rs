use crate::error::{StoreError, StoreResult};
use crate::model::{Draft, Event, EventId};
use crate::store::{EventStore, MemoryStore};
use directories::ProjectDirs;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const EVENTS_FILE_NAME: &str = "events.json";

pub struct LocalStorage;

impl LocalStorage {
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "slotcal", "slotcal")
    }

    /// `<data_dir>/events.json`, creating the data directory if needed.
    pub fn default_path() -> Option<PathBuf> {
        let proj = Self::project_dirs()?;
        let data_dir = proj.data_dir();
        if !data_dir.exists() {
            let _ = fs::create_dir_all(data_dir);
        }
        Some(data_dir.join(EVENTS_FILE_NAME))
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> std::io::Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Runs `f` while holding an advisory lock on `<path>.lock`.
    pub fn with_lock<T, F>(path: &Path, exclusive: bool, f: F) -> StoreResult<T>
    where
        F: FnOnce() -> StoreResult<T>,
    {
        let lock_path = path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;
        if exclusive {
            lock_file.lock_exclusive()?;
        } else {
            FileExt::lock_shared(&lock_file)?;
        }
        let result = f();
        let _ = FileExt::unlock(&lock_file);
        result
    }

    fn ensure_parent(path: &Path) -> StoreResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    // Callers hold the lock.
    fn read_unlocked(path: &Path) -> StoreResult<Vec<Event>> {
        if !path.exists() {
            return Ok(vec![]);
        }
        let file = File::open(path)?;
        let events: Vec<Event> = serde_json::from_reader(file)?;
        Ok(events)
    }

    fn write_unlocked(path: &Path, events: &[Event]) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(events)?;
        Self::atomic_write(path, json)?;
        Ok(())
    }

    /// A missing file is an empty calendar. An unreadable one is an error.
    pub fn load(path: &Path) -> StoreResult<Vec<Event>> {
        if !path.exists() {
            return Ok(vec![]);
        }
        Self::with_lock(path, false, || Self::read_unlocked(path))
    }

    /// Locks, reloads the file, applies `f` and writes the result back.
    /// Returns the store as written so the caller can adopt it.
    pub fn modify<T, F>(path: &Path, f: F) -> StoreResult<(MemoryStore, T)>
    where
        F: FnOnce(&mut MemoryStore) -> StoreResult<T>,
    {
        Self::ensure_parent(path)?;
        Self::with_lock(path, true, || {
            let mut store = MemoryStore::from_events(Self::read_unlocked(path)?)?;
            let out = f(&mut store)?;
            Self::write_unlocked(path, store.events())?;
            Ok((store, out))
        })
    }
}

/// Write-through store: every successful mutation is on disk before it
/// becomes visible in memory.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let events = LocalStorage::load(&path)?;
        let inner = MemoryStore::from_events(events)?;
        debug!(path = %path.display(), count = inner.len(), "opened event file");
        Ok(Self { path, inner })
    }

    pub fn open_default() -> StoreResult<Self> {
        let path = LocalStorage::default_path().ok_or_else(|| {
            StoreError::Persistence("no home directory for event storage".to_string())
        })?;
        Self::open(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `f` to the file's current contents, not to this handle's
    /// copy, so writes from other handles are never lost.
    fn write_through<T>(
        &mut self,
        f: impl FnOnce(&mut MemoryStore) -> StoreResult<T>,
    ) -> StoreResult<T> {
        match LocalStorage::modify(&self.path, f) {
            Ok((store, out)) => {
                self.inner = store;
                Ok(out)
            }
            Err(e) => {
                if matches!(e, StoreError::Persistence(_)) {
                    warn!(path = %self.path.display(), error = %e, "failed to persist events");
                }
                Err(e)
            }
        }
    }
}

impl EventStore for FileStore {
    fn list(&self) -> Vec<Event> {
        self.inner.list()
    }

    fn get(&self, id: &EventId) -> Option<Event> {
        self.inner.get(id)
    }

    fn add(&mut self, draft: &Draft) -> StoreResult<Event> {
        self.write_through(|store| store.add(draft))
    }

    fn replace(&mut self, id: &EventId, draft: &Draft) -> StoreResult<Event> {
        self.write_through(|store| store.replace(id, draft))
    }

    fn remove(&mut self, id: &EventId) -> StoreResult<()> {
        self.write_through(|store| store.remove(id))
    }
}
