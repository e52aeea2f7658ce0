use sbmd_tlv::{base64, tlv, StructSchema, Value};
use std::collections::BTreeMap;

fn encode_bytes(value: &Value, hint: Option<&str>) -> Vec<u8> {
    base64::decode(&tlv::encode(value, hint).unwrap())
}

#[test]
fn onoff_write_payload_matches_fixture() {
    assert_eq!(encode_bytes(&Value::Bool(true), Some("bool")), [0x09]);
    assert_eq!(encode_bytes(&Value::Bool(false), Some("bool")), [0x08]);
}

#[test]
fn move_to_level_command_matches_fixture() {
    let schema = StructSchema::new()
        .field("level", 0, "uint8")
        .field("transitionTime", 1, "uint16")
        .field("optionsMask", 2, "bitmap8")
        .field("optionsOverride", 3, "bitmap8");
    let fields = BTreeMap::from([
        ("level".to_owned(), Value::UInt(254)),
        ("transitionTime".to_owned(), Value::UInt(10)),
        ("optionsMask".to_owned(), Value::UInt(0)),
        ("optionsOverride".to_owned(), Value::UInt(0)),
    ]);
    let encoded = tlv::encode_struct(&fields, &schema).unwrap();
    assert_eq!(
        base64::decode(&encoded),
        [
            0x15, 0x24, 0x00, 0xFE, 0x25, 0x01, 0x0A, 0x00, //
            0x27, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
            0x27, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
            0x18,
        ]
    );
}

#[test]
fn vendor_name_matches_fixture() {
    let mut expected = vec![0x0C, 0x0A];
    expected.extend_from_slice(b"TestVendor");
    assert_eq!(
        encode_bytes(&Value::Utf8("TestVendor".into()), Some("string")),
        expected
    );
}

#[test]
fn server_list_matches_fixture() {
    let list = Value::Array([3u64, 4, 6, 8, 29].map(Value::UInt).to_vec());
    assert_eq!(
        encode_bytes(&list, None),
        [0x16, 0x04, 0x03, 0x04, 0x04, 0x04, 0x06, 0x04, 0x08, 0x04, 0x1D, 0x18]
    );
}

#[test]
fn credential_struct_matches_fixture() {
    let schema = StructSchema::new()
        .field("credentialType", 0, "enum8")
        .field("credentialData", 1, "octstr")
        .untyped_field("userIndex", 2);
    let fields = serde_json::json!({
        "credentialType": 1,
        "credentialData": [0xDE, 0xAD, 0xBE, 0xEF],
        "userIndex": null
    });
    let encoded = tlv::encode_struct_json(&fields, &schema).unwrap();
    assert_eq!(
        base64::decode(&encoded),
        [0x15, 0x24, 0x00, 0x01, 0x30, 0x01, 0x04, 0xDE, 0xAD, 0xBE, 0xEF, 0x34, 0x02, 0x18]
    );
}

#[test]
fn int16_matches_fixture() {
    assert_eq!(encode_bytes(&Value::Int(-300), Some("int16")), [0x01, 0xD4, 0xFE]);
    assert_eq!(encode_bytes(&Value::Int(-300), None), [0x01, 0xD4, 0xFE]);
}

#[test]
fn double_matches_fixture() {
    assert_eq!(
        encode_bytes(&Value::Double(1.5), Some("double")),
        [0x0B, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF8, 0x3F]
    );
}

#[test]
fn empty_struct_payload() {
    assert_eq!(base64::decode(&tlv::empty_struct()), [0x15, 0x18]);
}
