use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Muestra un snapshot MessagePack como JSON legible.
#[derive(Debug, Parser)]
struct Args {
    /// Archivo escrito por `make_base`
    file: PathBuf,
}

fn run(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    let file = File::open(&args.file)?;
    let data: serde_json::Value = rmp_serde::decode::from_read(file)?;
    info!(path = %args.file.display(), "Snapshot decoded");
    Ok(serde_json::to_string_pretty(&data)?)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let args = Args::parse();

    match run(&args) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error al leer el snapshot {}: {}", args.file.display(), e);
            ExitCode::FAILURE
        }
    }
}
