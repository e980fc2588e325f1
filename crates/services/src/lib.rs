#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod progress;

pub use app_services::AppServices;
pub use error::AppServicesError;
pub use progress::{CategoryProgress, ProgressService};
