#![no_main]
use libfuzzer_sys::fuzz_target;

use jobgate_core::signal::ParticipantSignal;
use jobgate_engine::decision::analyze_signals;

fuzz_target!(|data: &[u8]| {
    if let Ok(signals) = serde_json::from_slice::<Vec<ParticipantSignal>>(data) {
        match analyze_signals(&signals) {
            Ok(a) => assert_eq!(a.recommend + a.caution + a.reject, a.total),
            Err(_) => assert!(signals.is_empty()),
        }
    }
});
