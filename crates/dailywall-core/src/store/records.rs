//! Record insert and read operations.

use anyhow::{Context, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::db::WallpaperDb;
use crate::record::{StoredWallpaper, WallpaperId, WallpaperRecord};

impl WallpaperDb {
    /// Insert a new record. No uniqueness constraint: re-running on the same day adds a row.
    pub async fn insert_record(&self, rec: &WallpaperRecord) -> Result<WallpaperId> {
        let id = sqlx::query(
            r#"
            INSERT INTO wallpapers (
                year, month, day, headline, title,
                copyright, description, location, image
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(rec.year)
        .bind(i64::from(rec.month))
        .bind(i64::from(rec.day))
        .bind(&rec.headline)
        .bind(&rec.title)
        .bind(&rec.copyright)
        .bind(&rec.description)
        .bind(&rec.location)
        .bind(&rec.image)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();
        Ok(id)
    }

    /// Most recent records first, at most `limit`.
    pub async fn list_recent(&self, limit: u32) -> Result<Vec<StoredWallpaper>> {
        let rows = sqlx::query(
            r#"
            SELECT id, year, month, day, headline, title,
                   copyright, description, location, image
            FROM wallpapers
            ORDER BY id DESC
            LIMIT ?1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_stored).collect()
    }

    /// Fetch one record by id.
    pub async fn get(&self, id: WallpaperId) -> Result<Option<StoredWallpaper>> {
        let row = sqlx::query(
            r#"
            SELECT id, year, month, day, headline, title,
                   copyright, description, location, image
            FROM wallpapers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_stored).transpose()
    }

    pub async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM wallpapers")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("n"))
    }
}

fn row_to_stored(row: &SqliteRow) -> Result<StoredWallpaper> {
    let id: i64 = row.get("id");
    let month: i64 = row.get("month");
    let day: i64 = row.get("day");
    Ok(StoredWallpaper {
        id,
        record: WallpaperRecord {
            year: row.get("year"),
            month: u32::try_from(month).with_context(|| format!("row {}: bad month {}", id, month))?,
            day: u32::try_from(day).with_context(|| format!("row {}: bad day {}", id, day))?,
            headline: row.get("headline"),
            title: row.get("title"),
            copyright: row.get("copyright"),
            description: row.get("description"),
            location: row.get("location"),
            image: row.get("image"),
        },
    })
}
