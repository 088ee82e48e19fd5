pub mod app;
pub mod completion;
pub mod config;
pub mod day;
pub mod errors;
pub mod handlers;
pub mod history;
pub mod models;
pub mod provision;
pub mod state;
pub mod storage;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::load_data;
