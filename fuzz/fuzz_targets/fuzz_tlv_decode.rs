#![no_main]

use libfuzzer_sys::fuzz_target;
use sbmd_tlv::encoding::TlvReader;

fuzz_target!(|data: &[u8]| {
    let mut r = TlvReader::new(data);
    while r.has_more() {
        let before = r.position();
        if r.read_element().is_err() {
            break;
        }
        assert!(r.position() > before);
    }
});
