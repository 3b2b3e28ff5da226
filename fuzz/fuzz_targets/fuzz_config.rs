#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(config) = jobgate_core::config::RiskGateConfig::from_json(s) {
            assert!(jobgate_engine::risk::RiskGateEngine::new(config).is_ok());
        }
    }
});
