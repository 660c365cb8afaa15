pub mod api;
pub mod auth;
pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;

pub use crate::api::build_router;
pub use crate::core::errors::KleingroepeError;
pub use crate::core::services::KleingroepeService;

#[cfg(test)]
mod tests;
