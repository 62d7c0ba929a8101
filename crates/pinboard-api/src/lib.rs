pub mod app;
pub mod auth;
pub mod error;
pub mod gate;
pub mod messages;
pub mod middleware;
pub mod session;

pub use app::build_app;
pub use auth::{AppState, AppStateInner};
