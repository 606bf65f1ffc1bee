//! Persistent wallpaper store (SQLite via sqlx).
//!
//! One table, one INSERT per successful run. The crawler only needs
//! [`WallpaperStore::insert`]; reads back are for the CLI.

mod db;
mod records;


pub use db::WallpaperDb;

use std::future::Future;

use crate::record::{WallpaperId, WallpaperRecord};

/// Sink for the record produced by a successful run.
pub trait WallpaperStore {
    /// Insert `record` and return its assigned id.
    fn insert(&self, record: &WallpaperRecord) -> impl Future<Output = anyhow::Result<WallpaperId>>;
}

impl WallpaperStore for WallpaperDb {
    async fn insert(&self, record: &WallpaperRecord) -> anyhow::Result<WallpaperId> {
        self.insert_record(record).await
    }
}
