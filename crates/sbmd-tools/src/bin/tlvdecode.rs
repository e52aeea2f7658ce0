use clap::Parser;
use sbmd_tlv::tlv;

#[derive(Parser, Debug)]
#[command(name = "sbmd-tlvdecode", about = "Decode a base64 Matter TLV payload to JSON")]
struct Args {
    /// Base64 TLV payload.
    payload: String,
    #[arg(long)]
    pretty: bool,
    /// List every top-level element with its tag and wire type.
    #[arg(long)]
    elements: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let output = if args.elements {
        match tlv::decode_elements(&args.payload) {
            Ok(elements) => serde_json::Value::Array(
                elements
                    .iter()
                    .map(|e| -> Result<serde_json::Value, serde_json::Error> {
                        Ok(serde_json::json!({
                            "tag": serde_json::to_value(e.tag)?,
                            "type": serde_json::to_value(e.element_type)?,
                            "value": e.value.to_json(),
                        }))
                    })
                    .collect::<Result<_, serde_json::Error>>()?,
            ),
            Err(e) => {
                eprintln!("decode failed: {e}");
                std::process::exit(1);
            }
        }
    } else {
        match tlv::decode_json(&args.payload) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("decode failed: {e}");
                std::process::exit(1);
            }
        }
    };

    if args.pretty {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{output}");
    }
    Ok(())
}
