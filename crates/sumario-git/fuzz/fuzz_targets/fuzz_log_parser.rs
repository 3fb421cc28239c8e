#![no_main]

use libfuzzer_sys::fuzz_target;
use sumario_git::parse_log_output;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let entries = parse_log_output(text);
        assert!(entries.len() <= text.lines().count());
        for entry in &entries {
            assert!(!entry.full_hash.is_empty());
            let _ = entry.display_subject(70);
        }
    }
});
