pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod recorder;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod state;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{MemoryStore, RedisStore, VisitStore};
