use sbmd_tlv::encoding::TlvReader;
use sbmd_tlv::{base64, tlv, Value};
use std::fs;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .canonicalize()
        .expect("workspace root should be resolvable")
}

fn parse_hex_fixture(path: &Path) -> Vec<u8> {
    let content = fs::read_to_string(path).expect("fixture must be readable");
    let mut out = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        for token in trimmed.split_whitespace() {
            let byte = u8::from_str_radix(token, 16)
                .unwrap_or_else(|_| panic!("invalid hex token '{token}' in {}", path.display()));
            out.push(byte);
        }
    }
    out
}

fn fixture(name: &str) -> Vec<u8> {
    parse_hex_fixture(&workspace_root().join("fixtures/golden").join(name))
}

#[test]
fn golden_corpus_fixtures_decode_as_one_element() {
    let fixture_dir = workspace_root().join("fixtures/golden");
    let mut fixture_files = fs::read_dir(&fixture_dir)
        .expect("fixtures directory should exist")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "hex"))
        .collect::<Vec<_>>();
    fixture_files.sort();
    assert!(
        !fixture_files.is_empty(),
        "expected at least one corpus fixture in {}",
        fixture_dir.display()
    );

    for fixture in fixture_files {
        let bytes = parse_hex_fixture(&fixture);
        assert!(
            !bytes.is_empty(),
            "fixture {} must contain at least one byte",
            fixture.display()
        );

        let mut r = TlvReader::new(&bytes);
        let element = r
            .read_element()
            .unwrap_or_else(|e| panic!("fixture {} failed decode with error {e:?}", fixture.display()))
            .unwrap_or_else(|| panic!("fixture {} starts with an end marker", fixture.display()));
        assert_eq!(
            r.remaining(),
            0,
            "fixture {} left trailing bytes after {:?}",
            fixture.display(),
            element.element_type
        );

        // The facade must agree with the reader.
        assert_eq!(tlv::decode(&base64::encode(&bytes)).unwrap(), element.value);
    }
}

#[test]
fn level_command_fixture_values() {
    let value = tlv::decode_struct(&base64::encode(&fixture("level_move_to_level_command.hex")))
        .unwrap();
    assert_eq!(value.field(0), Some(&Value::UInt(254)));
    assert_eq!(value.field(1), Some(&Value::UInt(10)));
    assert_eq!(value.field(2), Some(&Value::UInt(0)));
    assert_eq!(value.field(3), Some(&Value::UInt(0)));
}

#[test]
fn vendor_name_fixture_value() {
    let value = tlv::decode(&base64::encode(&fixture("basic_info_vendor_name.hex"))).unwrap();
    assert_eq!(value, Value::Utf8("TestVendor".into()));
}

#[test]
fn server_list_fixture_value() {
    let value = tlv::decode(&base64::encode(&fixture("descriptor_server_list.hex"))).unwrap();
    let ids: Vec<_> = value.as_slice().unwrap().to_vec();
    assert_eq!(
        ids,
        [3u64, 4, 6, 8, 29].map(Value::UInt).to_vec()
    );
}

#[test]
fn credential_fixture_value() {
    let value =
        tlv::decode_json(&base64::encode(&fixture("door_lock_credential_struct.hex"))).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"0": 1, "1": [0xDE, 0xAD, 0xBE, 0xEF], "2": null})
    );
}

#[test]
fn numeric_fixture_values() {
    let decode = |name: &str| tlv::decode(&base64::encode(&fixture(name))).unwrap();
    assert_eq!(decode("color_temperature_int16.hex"), Value::Int(-300));
    assert_eq!(decode("double_value.hex"), Value::Double(1.5));
    assert_eq!(decode("float_value.hex"), Value::Float(0.5));
    assert_eq!(decode("onoff_attribute_true.hex"), Value::Bool(true));
}

#[test]
fn profile_tag_fixture_keys() {
    let value = tlv::decode(&base64::encode(&fixture("profile_tagged_struct.hex"))).unwrap();
    assert_eq!(value.field(0x1234), Some(&Value::UInt(7)));
    assert_eq!(value.field(5), Some(&Value::Bool(true)));
}

#[test]
fn nested_list_fixture_value() {
    let value = tlv::decode_json(&base64::encode(&fixture("nested_list_of_structs.hex"))).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"0": [{"0": 1, "1": "on"}, {"0": 2, "1": "off"}]})
    );
}
