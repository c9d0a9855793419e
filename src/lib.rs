pub mod api;
pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod input;
pub mod router;
pub mod service;
pub mod types;
pub mod ui;

pub use app::{NovaApp, Outcome};
pub use error::NovaError;
