//! CLI command handlers, one file per command.

mod history;
mod normalize;
mod run;

pub use history::run_history;
pub use normalize::run_normalize;
pub use run::run_crawl;
