pub mod directory;
pub mod errors;
pub mod export;
pub mod models;
pub mod services;
