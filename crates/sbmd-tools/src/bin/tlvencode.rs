use clap::Parser;
use sbmd_tlv::{base64, tlv, StructSchema};
use sbmd_tools::{to_hex, TypeHintArg};

#[derive(Parser, Debug)]
#[command(name = "sbmd-tlvencode", about = "Encode a JSON value as a base64 Matter TLV payload")]
struct Args {
    /// JSON value; object keys are tag numbers unless --schema is given.
    value: String,
    #[arg(long = "type", value_enum)]
    type_hint: Option<TypeHintArg>,
    /// Struct layout as JSON: {"field": {"tag": 0, "type": "uint8"}, ...}.
    #[arg(long, conflicts_with = "type_hint")]
    schema: Option<String>,
    /// Also print the payload bytes as hex.
    #[arg(long)]
    hex: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let value: serde_json::Value = serde_json::from_str(&args.value)?;

    let encoded = match &args.schema {
        Some(schema) => {
            let schema: StructSchema = serde_json::from_str(schema)?;
            log::debug!("encoding {} schema fields", schema.fields().len());
            tlv::encode_struct_json(&value, &schema)?
        }
        None => tlv::encode_json(&value, args.type_hint.map(TypeHintArg::as_str))?,
    };

    println!("{encoded}");
    if args.hex {
        println!("{}", to_hex(&base64::decode(&encoded)));
    }
    Ok(())
}
