#![no_main]

use libfuzzer_sys::fuzz_target;
use sbmd_tlv::utf8;

fuzz_target!(|data: &[u8]| {
    let text = utf8::decode(data);
    assert_eq!(utf8::decode(&utf8::encode(&text)), text);
});
