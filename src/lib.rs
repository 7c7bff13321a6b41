pub mod config;
pub mod database;
pub mod logging;
pub mod models;
pub mod stats;
pub mod utils;
pub mod cli;
pub mod tui;

pub use config::Config;
pub use database::Database;
pub use models::{Event, EventType, Priority, Task};
pub use utils::Profile;
