#![forbid(unsafe_code)]

pub mod config;
pub mod errors;
pub mod job;
pub mod record;
pub mod risk;
pub mod signal;
pub mod traits;
pub mod types;
