use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::player::PlayerRecord;

/// Every player record, keyed by the owner's user id.
pub(crate) type Store = BTreeMap<String, PlayerRecord>;

pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error("Unable to access {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("Malformed player document {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Player store lock poisoned")]
    Poisoned,
}

/// The on-disk JSON document holding all player records.
///
/// Reads and writes always cover the whole document. `read` and `update` hold a
/// lock for the full load/save cycle, so commands in this process never clobber
/// each other's writes.
pub(crate) struct RecordStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl RecordStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document, creating it (and its directory) empty if absent.
    pub(crate) fn load(&self) -> Result<Store> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No player document at {}, creating one", self.path.display());
                let store = Store::new();
                self.save(&store)?;
                return Ok(store);
            }
            Err(source) => return Err(self.io_error(source)),
        };

        serde_json::from_str(&contents).map_err(|source| Error::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Replaces the document with `store`.
    ///
    /// The new contents go to a sibling file first and are renamed into place, so a
    /// reader never sees a half-written document.
    pub(crate) fn save(&self, store: &Store) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(store).map_err(|source| Error::Malformed {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        log::debug!("Saved {} player(s) to {}", store.len(), self.path.display());
        Ok(())
    }

    /// Loads the document and hands it to `f` without saving.
    pub(crate) fn read<T>(&self, f: impl FnOnce(&Store) -> T) -> Result<T> {
        let _guard = self.lock.lock().map_err(|_| Error::Poisoned)?;
        let store = self.load()?;
        Ok(f(&store))
    }

    /// Loads the document, lets `f` change it, and saves it if `f` reports a change.
    ///
    /// `f` returns its output together with whether it mutated the store.
    pub(crate) fn update<T>(&self, f: impl FnOnce(&mut Store) -> (T, bool)) -> Result<T> {
        let _guard = self.lock.lock().map_err(|_| Error::Poisoned)?;
        let mut store = self.load()?;

        let (output, changed) = f(&mut store);
        if changed {
            self.save(&store)?;
        }
        Ok(output)
    }

    fn io_error(&self, source: io::Error) -> Error {
        Error::Io {
            path: self.path.clone(),
            source,
        }
    }
}
