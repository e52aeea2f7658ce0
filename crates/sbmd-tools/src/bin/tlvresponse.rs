use clap::{Parser, Subcommand};
use sbmd_tlv::{response, tlv, InvokeOptions, ScriptResponse, WriteOptions};
use sbmd_tools::to_hex;

#[derive(Parser, Debug)]
#[command(name = "sbmd-tlvresponse", about = "Build or inspect script write/invoke results")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print an invoke result.
    Invoke {
        #[arg(long)]
        cluster: u32,
        #[arg(long)]
        command: u32,
        #[arg(long = "tlv")]
        payload: Option<String>,
        #[arg(long)]
        endpoint: Option<u16>,
        #[arg(long)]
        timeout_ms: Option<u16>,
    },
    /// Print a write result.
    Write {
        #[arg(long)]
        cluster: u32,
        #[arg(long)]
        attribute: u32,
        #[arg(long = "tlv")]
        payload: String,
        #[arg(long)]
        endpoint: Option<u16>,
    },
    /// Parse a result as the host would and show its payload.
    Inspect { json: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Invoke {
            cluster,
            command,
            payload,
            endpoint,
            timeout_ms,
        } => {
            let options = InvokeOptions {
                endpoint_id: endpoint,
                timed_invoke_timeout_ms: timeout_ms,
            };
            let result = response::invoke(cluster, command, payload.as_deref(), Some(options));
            println!("{}", serde_json::to_string(&result)?);
        }
        Command::Write {
            cluster,
            attribute,
            payload,
            endpoint,
        } => {
            let options = WriteOptions {
                endpoint_id: endpoint,
            };
            let result = response::write(cluster, attribute, &payload, Some(options));
            println!("{}", serde_json::to_string(&result)?);
        }
        Command::Inspect { json } => {
            let result = match ScriptResponse::from_json(&json) {
                Ok(result) => result,
                Err(e) => {
                    eprintln!("inspect failed: {e}");
                    std::process::exit(1);
                }
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
            let bytes = result.tlv_bytes();
            if !bytes.is_empty() {
                println!("payload: {}", to_hex(&bytes));
            }
            if let Some(payload) = result.tlv_base64() {
                println!("decoded: {}", tlv::decode_json(payload)?);
            }
        }
    }
    Ok(())
}
