//! A single JSON document on disk, guarded by an async mutex.
//!
//! Every access goes through the mutex, so read-modify-write cycles issued
//! through one [`JsonFile`] are serialized and never lose an update. Writes
//! land in a sibling temp file that is renamed over the target, so the file
//! is always either the old or the new content.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::error::{StoreError, StoreResult};

pub struct JsonFile<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current value. A missing file reads as `T::default()`.
    pub async fn load(&self) -> StoreResult<T> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    /// Run `mutate` against the current value and persist the result.
    ///
    /// Nothing is written when `mutate` returns an error.
    pub async fn update<R, F>(&self, mutate: F) -> StoreResult<R>
    where
        F: FnOnce(&mut T) -> StoreResult<R>,
    {
        self.update_if(|value| mutate(value).map(|out| (out, true)))
            .await
    }

    /// Like [`update`](Self::update), but `mutate` also reports whether it
    /// changed anything; the file is only rewritten when it did.
    pub async fn update_if<R, F>(&self, mutate: F) -> StoreResult<R>
    where
        F: FnOnce(&mut T) -> StoreResult<(R, bool)>,
    {
        let _guard = self.lock.lock().await;
        let mut value = self.read().await?;
        let (out, changed) = mutate(&mut value)?;
        if changed {
            self.write(&value).await?;
        }
        Ok(out)
    }

    /// Update one record located by `mutate`. A `None` result means the
    /// record was not found and leaves the file untouched.
    pub async fn update_found<R, F>(&self, mutate: F) -> StoreResult<Option<R>>
    where
        F: FnOnce(&mut T) -> StoreResult<Option<R>>,
    {
        self.update_if(|value| {
            mutate(value).map(|found| {
                let changed = found.is_some();
                (found, changed)
            })
        })
        .await
    }

    async fn read(&self) -> StoreResult<T> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
            Err(source) => Err(StoreError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    async fn write(&self, value: &T) -> StoreResult<()> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        let bytes = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, &bytes).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(io_err)?;
        Ok(())
    }
}
