#![no_main]
use libfuzzer_sys::fuzz_target;

use jobgate_core::job::Job;
use jobgate_engine::risk::RiskGateEngine;

fuzz_target!(|data: &[u8]| {
    if let Ok(job) = serde_json::from_slice::<Job>(data) {
        let now = chrono::DateTime::from_timestamp(1_792_152_000, 0).unwrap_or_default();
        if let Ok(result) = RiskGateEngine::default().evaluate_at(&job, now) {
            assert!((0.0..=1.0).contains(&result.score));
            assert!(result.risk_factors.len() <= 5);
            assert_eq!(result.recommendation, result.gate_status.recommendation());
        }
    }
});
