use crate::utils::StorageKey;
use gloo::storage::{LocalStorage, Storage, errors::StorageError};
use tapgrid_core::{self as game, BestScoreStore, GameError, Score};

/// Best score kept in `localStorage`. Every failure degrades to
/// [`GameError::PersistenceUnavailable`] so the round carries on in memory.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct LocalBestScore;

impl LocalBestScore {
    fn is_available() -> bool {
        matches!(gloo::utils::window().local_storage(), Ok(Some(_)))
    }
}

impl StorageKey for LocalBestScore {
    const KEY: &'static str = "tapgrid:best-score";
}

impl BestScoreStore for LocalBestScore {
    fn load_best(&self) -> game::Result<Score> {
        if !Self::is_available() {
            return Err(GameError::PersistenceUnavailable);
        }

        match LocalStorage::get::<Score>(Self::KEY) {
            Ok(best) => Ok(best),
            Err(StorageError::KeyNotFound(_)) => Ok(0),
            Err(err) => {
                log::warn!("failed to read {}: {}", Self::KEY, err);
                Err(GameError::PersistenceUnavailable)
            }
        }
    }

    fn save_best(&mut self, best: Score) -> game::Result<()> {
        if !Self::is_available() {
            return Err(GameError::PersistenceUnavailable);
        }

        LocalStorage::set(Self::KEY, best).map_err(|err| {
            log::warn!("failed to write {}: {}", Self::KEY, err);
            GameError::PersistenceUnavailable
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_uses_namespace() {
        assert_eq!(<LocalBestScore as StorageKey>::KEY, "tapgrid:best-score");
    }
}
