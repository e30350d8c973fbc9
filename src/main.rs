use clap::{error::ErrorKind, Parser, Subcommand};
use std::io::{self, BufReader, BufWriter};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;
use transport_catalogue::{load_config, make_base, process_requests, AppConfig};

/// Catálogo de transporte: construye la base y responde consultas.
/// Lee JSON por stdin y escribe las respuestas por stdout.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Construye el catálogo y guarda el snapshot
    #[command(name = "make_base")]
    MakeBase,
    /// Responde stat_requests sobre un snapshot guardado
    #[command(name = "process_requests")]
    ProcessRequests,
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error al cargar la configuración: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config);

    let input = BufReader::new(io::stdin().lock());
    let result = match cli.mode {
        Mode::MakeBase => make_base(input).map(|_| ()),
        Mode::ProcessRequests => {
            process_requests(input, BufWriter::new(io::stdout().lock()), &config)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
