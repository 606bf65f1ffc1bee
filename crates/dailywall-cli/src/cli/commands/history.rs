//! `dailywall history` – list recent records.

use anyhow::Result;
use dailywall_core::store::WallpaperDb;

pub async fn run_history(db: &WallpaperDb, limit: u32) -> Result<()> {
    let rows = db.list_recent(limit).await?;
    if rows.is_empty() {
        println!("No wallpapers recorded.");
        return Ok(());
    }
    println!("{:<6} {:<10} {:<40} {}", "ID", "DATE", "IMAGE", "TITLE");
    for w in rows {
        let r = &w.record;
        println!(
            "{:<6} {:<10} {:<40} {}",
            w.id,
            format!("{:04}-{:02}-{:02}", r.year, r.month, r.day),
            r.image,
            r.title.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}
