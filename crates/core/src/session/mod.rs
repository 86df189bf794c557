//! Session state held by the surrounding application.

mod error;
mod service;
mod store;


pub use error::SessionError;
pub use service::ForecastSession;
pub use store::ForecastStore;
