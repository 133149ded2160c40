//! CLI command implementations.

pub mod export;
pub mod import;
pub mod new;
pub mod score;
pub mod status;
