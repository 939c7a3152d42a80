use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, info};

use super::{KeyValueStore, MemoryStore};
use crate::{Error, Result};

/// Set of reserved nicknames. Only presence matters, so the values are `()`.
pub struct NicknameRegistry {
    store:       Arc<dyn KeyValueStore<()>>,
    // serialises check-then-reserve so two players can't claim one name
    registering: Mutex<()>,
}

impl NicknameRegistry {
    pub fn new(store: Arc<dyn KeyValueStore<()>>) -> Self {
        Self {
            store,
            registering: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    #[must_use]
    pub fn is_taken(&self, nickname: &str) -> bool {
        self.store.get(nickname).is_some()
    }

    /// Reserves `nickname`.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for a blank nickname, [`Error::Conflict`] with a
    /// free alternative if it is already reserved.
    pub fn register(&self, nickname: &str) -> Result<()> {
        if nickname.trim().is_empty() {
            return Err(Error::Validation("Nickname is required".to_owned()));
        }

        let _guard = self
            .registering
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if self.is_taken(nickname) {
            let suggestion = self.suggest(nickname);
            debug!("{} is taken, suggesting {}", nickname, suggestion);
            return Err(Error::Conflict {
                nickname: nickname.to_owned(),
                suggestion,
            });
        }

        self.store.set(nickname, ());
        info!("registered nickname {}", nickname);
        Ok(())
    }

    /// `nickname` followed by the smallest positive number that makes it
    /// free.
    #[must_use]
    pub fn suggest(&self, nickname: &str) -> String {
        (1_u64..)
            .map(|n| format!("{nickname}{n}"))
            .find(|candidate| !self.is_taken(candidate))
            .unwrap_or_else(|| nickname.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(result: Result<()>) -> String {
        match result {
            Err(Error::Conflict { suggestion, .. }) => suggestion,
            other => panic!("expected a conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_register_new_name() {
        let registry = NicknameRegistry::in_memory();
        registry.register("fox").unwrap();
        assert!(registry.is_taken("fox"));
        assert!(!registry.is_taken("owl"));
    }

    #[test]
    fn test_taken_name_suggests_alternative() {
        let registry = NicknameRegistry::in_memory();
        registry.register("fox").unwrap();

        assert_eq!(suggestion(registry.register("fox")), "fox1");

        registry.register("fox1").unwrap();
        assert_eq!(suggestion(registry.register("fox")), "fox2");
    }

    #[test]
    fn test_suggestion_fills_lowest_gap() {
        let registry = NicknameRegistry::in_memory();
        for name in ["fox", "fox1", "fox3"] {
            registry.register(name).unwrap();
        }
        assert_eq!(suggestion(registry.register("fox")), "fox2");
    }

    #[test]
    fn test_blank_name_rejected() {
        let registry = NicknameRegistry::in_memory();
        assert!(matches!(registry.register(""), Err(Error::Validation(_))));
        assert!(matches!(registry.register("   "), Err(Error::Validation(_))));
    }

    #[test]
    fn test_shared_store() {
        let store: Arc<MemoryStore<()>> = Arc::new(MemoryStore::new());
        store.set("fox", ());

        let registry = NicknameRegistry::new(store);
        assert_eq!(suggestion(registry.register("fox")), "fox1");
    }
}
