use cardano_enterprise_address::{AddressService, Network};
use log::error;
use serde::Serialize;
use std::process::ExitCode;

const USAGE: &str = "usage: cardano-address [mainnet|testnet] [--pretty]";

fn main() -> ExitCode {
    env_logger::init();

    match run(std::env::args().skip(1)) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("address generation failed: {e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: impl Iterator<Item = String>) -> Result<String, Box<dyn std::error::Error>> {
    let mut pretty = false;
    let mut network: Option<Network> = None;

    for arg in args {
        match arg.as_str() {
            "--pretty" => pretty = true,
            "-h" | "--help" => return Ok(USAGE.to_string()),
            other if network.is_none() => network = Some(other.parse()?),
            other => return Err(format!("unexpected argument {other:?}\n{USAGE}").into()),
        }
    }

    let service = AddressService;
    match network {
        // Single network
        Some(network) => render(&service.generate_for(network)?, pretty),
        // Testnet + Mainnet for the same key pair
        None => render(&service.generate()?, pretty),
    }
}

fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String, Box<dyn std::error::Error>> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
