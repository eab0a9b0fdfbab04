use std::marker::PhantomData;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::local_store::{LocalStore, StoreError};

/// A stored record addressed by its timestamp id.
pub trait Record {
    fn id(&self) -> i64;
}

/// A JSON array persisted under one namespace key. Every write re-serializes
/// the whole array.
pub struct Collection<T> {
    store: Arc<LocalStore>,
    key: &'static str,
    seed: fn() -> Vec<T>,
    _marker: PhantomData<T>,
}

impl<T> Collection<T>
where
    T: Record + Serialize + DeserializeOwned,
{
    /// `seed` supplies the list shown when nothing has been persisted yet.
    pub fn new(store: Arc<LocalStore>, key: &'static str, seed: fn() -> Vec<T>) -> Self {
        Self {
            store,
            key,
            seed,
            _marker: PhantomData,
        }
    }

    /// Persisted list, or the seed list when the key is absent or unreadable.
    pub async fn list(&self) -> Vec<T> {
        self.store.load_or_else(self.key, self.seed).await
    }

    /// Persisted list only; absent or unreadable keys read as empty.
    pub async fn persisted(&self) -> Vec<T> {
        self.store.load_or_else(self.key, Vec::new).await
    }

    pub async fn get(&self, id: i64) -> Option<T> {
        self.list().await.into_iter().find(|item| item.id() == id)
    }

    pub async fn save_all(&self, items: &[T]) -> Result<(), StoreError> {
        debug!("Persisting {} records under '{}'", items.len(), self.key);
        self.store.save(self.key, &items).await
    }

    /// Applies `apply` to the record with `id` and persists the whole list.
    /// Returns `Ok(None)` when no record has that id.
    pub async fn update<R, E, F>(&self, id: i64, apply: F) -> Result<Option<R>, E>
    where
        F: FnOnce(&mut T) -> Result<R, E>,
        E: From<StoreError>,
    {
        let mut items = self.list().await;
        let Some(item) = items.iter_mut().find(|item| item.id() == id) else {
            return Ok(None);
        };

        let outcome = apply(item)?;
        self.save_all(&items).await?;
        Ok(Some(outcome))
    }

    /// Removes the record with `id`, returning it together with the remaining list.
    pub async fn remove(&self, id: i64) -> Result<Option<(T, Vec<T>)>, StoreError> {
        let mut items = self.list().await;
        let Some(index) = items.iter().position(|item| item.id() == id) else {
            return Ok(None);
        };

        let removed = items.remove(index);
        self.save_all(&items).await?;
        Ok(Some((removed, items)))
    }
}
