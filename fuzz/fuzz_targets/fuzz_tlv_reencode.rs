#![no_main]

use libfuzzer_sys::fuzz_target;
use sbmd_tlv::{base64, tlv};

// Anything that decodes must encode again, and the re-encoding must decode to
// the same value. Floats are compared through JSON since NaN != NaN.
fuzz_target!(|data: &[u8]| {
    let Ok(value) = tlv::decode(&base64::encode(data)) else {
        return;
    };
    // Struct keys from profile tags may exceed a context tag.
    let Ok(encoded) = tlv::encode(&value, None) else {
        return;
    };
    let again = tlv::decode(&encoded).expect("re-encoded payload must decode");
    assert_eq!(value.to_json(), again.to_json());
});
