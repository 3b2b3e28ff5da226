use sha2::{Digest, Sha256};

use jobgate_core::errors::Result;
use jobgate_core::record::{DecisionContext, DecisionRecord};

/// Deterministic digest of a context snapshot.
///
/// Struct fields serialize in declaration order, so the JSON form is stable
/// for a given value.
pub fn context_digest(context: &DecisionContext) -> Result<String> {
    let canonical = serde_json::to_string(context)?;
    Ok(format!("sha256:{:x}", Sha256::digest(canonical.as_bytes())))
}

/// True when the record's context still matches the digest taken at creation.
pub fn verify_context(record: &DecisionRecord) -> Result<bool> {
    Ok(context_digest(&record.context)? == record.context_digest)
}
