pub mod clients;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod models;
pub mod services;
pub mod telemetry;

#[cfg(test)]
mod test_helpers;

pub use error::{AppError, Result};
