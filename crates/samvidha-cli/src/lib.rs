pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod scrape;

pub use error::{Result, SamvidhaError};
