#![no_main]

use libfuzzer_sys::fuzz_target;
use sbmd_tlv::base64;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let bytes = base64::decode(&text);
    assert_eq!(base64::decode(&base64::encode(&bytes)), bytes);
});
