#![no_main]

use libfuzzer_sys::fuzz_target;

use parcel_asset::Envelope;

// Parsing arbitrary text as an operation envelope must never panic, and any
// envelope that parses must survive re-encoding unchanged.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(envelope) = Envelope::parse_line(text) {
        let line = envelope.to_line().expect("parsed envelope re-encodes");
        let again = Envelope::parse_line(&line).expect("re-encoded envelope parses");
        assert_eq!(again, envelope);
    }
});
