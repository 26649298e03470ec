use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use serde::{Serialize, de::DeserializeOwned};

use crate::{core::price_area::PriceArea, prelude::*};

/// Keeps the daily API responses on disk, since the past prices never change.
pub struct ResponseCache {
    root: PathBuf,
}

impl ResponseCache {
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// `{root}/{YYYY}/{MM}/{DD}_{area}.json`
    fn path(&self, on: NaiveDate, area: PriceArea) -> PathBuf {
        self.root
            .join(on.format("%Y").to_string())
            .join(on.format("%m").to_string())
            .join(format!("{}_{area}.json", on.format("%d")))
    }

    /// Return the cached response of the day, or fetch and store it.
    ///
    /// Empty responses are not stored.
    #[instrument(skip_all, fields(on = %on, area = %area))]
    pub fn get_or_fetch<T: Serialize + DeserializeOwned>(
        &self,
        on: NaiveDate,
        area: PriceArea,
        fetch: impl FnOnce() -> Result<Vec<T>>,
    ) -> Result<Vec<T>> {
        let path = self.path(on, area);
        match Self::read_from(&path) {
            Ok(Some(items)) => {
                debug!(path = %path.display(), n_items = items.len(), "Cache hit");
                return Ok(items);
            }
            Ok(None) => {}
            Err(error) => {
                warn!(path = %path.display(), "Failed to read the cached response: {error:#}");
            }
        }

        let items = fetch()?;
        if !items.is_empty()
            && let Err(error) = Self::write_to(&path, &items)
        {
            warn!(path = %path.display(), "Failed to cache the response: {error:#}");
        }
        Ok(items)
    }

    fn read_from<T: DeserializeOwned>(path: &Path) -> Result<Option<Vec<T>>> {
        if path.is_file() { Ok(Some(serde_json::from_slice(&fs::read(path)?)?)) } else { Ok(None) }
    }

    fn write_to<T: Serialize>(path: &Path, items: &[T]) -> Result {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_vec(items)?)?;
        Ok(())
    }
}
