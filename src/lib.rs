pub mod app;
pub mod config;
pub mod controller;
pub mod dates;
pub mod errors;
pub mod fetcher;
pub mod handlers;
pub mod models;
pub mod stats;
pub mod ui;
pub mod state;

pub use app::router;
pub use config::AppConfig;
pub use controller::FormController;
pub use state::AppState;
