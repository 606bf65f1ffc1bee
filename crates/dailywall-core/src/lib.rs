pub mod config;
pub mod logging;

pub mod crawler;
pub mod date_match;
pub mod error;
pub mod http;
pub mod model;
pub mod record;
pub mod retry;
pub mod storage;
pub mod store;
pub mod url_model;

pub use error::CrawlError;
