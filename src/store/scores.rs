use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, PoisonError},
};

use log::debug;

use super::{KeyValueStore, MemoryStore};
use crate::{Error, Result};

/// Best score per nickname.
pub struct ScoreStore {
    store:     Arc<dyn KeyValueStore<i64>>,
    recording: Mutex<()>,
}

impl ScoreStore {
    pub fn new(store: Arc<dyn KeyValueStore<i64>>) -> Self {
        Self {
            store,
            recording: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Keeps the higher of `score` and the stored best, returning the best.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for a blank nickname.
    pub fn record(&self, nickname: &str, score: i64) -> Result<i64> {
        if nickname.trim().is_empty() {
            return Err(Error::Validation(
                "Nickname and score are required".to_owned(),
            ));
        }

        let _guard = self
            .recording
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let best = self.store.get(nickname).map_or(score, |old| old.max(score));
        self.store.set(nickname, best);
        debug!("{} scored {}, best is {}", nickname, score, best);

        Ok(best)
    }

    #[must_use]
    pub fn best(&self, nickname: &str) -> Option<i64> {
        self.store.get(nickname)
    }

    /// Every nickname with its best score. Sorting for display is up to the
    /// caller, see [`super::rank`].
    #[must_use]
    pub fn all(&self) -> BTreeMap<String, i64> {
        self.store.entries().into_iter().collect()
    }
}
