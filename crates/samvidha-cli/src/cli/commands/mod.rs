pub mod auth;
pub mod history;
pub mod report;
pub mod watch;

pub use auth::{login, logout, status};
pub use history::{clear as clear_history, show as show_history};
pub use report::report;
pub use watch::watch;
