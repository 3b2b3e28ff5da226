pub mod aggregate;
pub mod engine;
pub mod evaluators;
pub mod explain;

pub use engine::RiskGateEngine;
