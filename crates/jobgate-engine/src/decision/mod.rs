pub mod consensus;
pub mod digest;
pub mod record;
pub mod sequence;
pub mod summary;
pub mod timeline;

pub use consensus::{analyze_signals, SignalAnalysis};
pub use record::{CreateRecordInput, DecisionRecordEngine};
