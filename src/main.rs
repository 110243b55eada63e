//! pkcs8-normalizer - convert PEM private keys to unencrypted PKCS#8

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pkcs8_normalizer::{convert, derive_identifier};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Convert a PEM private key (PKCS#1 RSA, SEC1 EC or PKCS#8) to unencrypted PKCS#8
#[derive(Parser, Debug)]
#[command(name = "pkcs8-normalizer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// PEM file to read; stdin when omitted or `-`
    input: Option<PathBuf>,

    /// Rendering of the PKCS#8 key
    #[arg(short, long, value_enum, default_value_t = Format::Base64)]
    format: Format,

    /// Write the key to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also print the identifier derived from the PEM text
    #[arg(long)]
    id: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Standard base64 of the DER bytes
    Base64,
    /// `PRIVATE KEY` PEM block
    Pem,
    /// Raw DER bytes
    Der,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let pem = read_input(cli.input.as_ref())?;
    let pkcs8 = convert(&pem)?;

    let mut rendered = Vec::new();
    if cli.id {
        let id = derive_identifier(&String::from_utf8_lossy(&pem));
        match cli.format {
            Format::Der => eprintln!("{id}"),
            Format::Base64 | Format::Pem => writeln!(rendered, "{id}")?,
        }
    }
    match cli.format {
        Format::Base64 => writeln!(rendered, "{}", pkcs8.to_base64())?,
        Format::Pem => rendered.extend_from_slice(pkcs8.to_pem().as_bytes()),
        Format::Der => rendered.extend_from_slice(pkcs8.as_bytes()),
    }

    match cli.output {
        Some(path) => std::fs::write(&path, &rendered)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => std::io::stdout()
            .lock()
            .write_all(&rendered)
            .context("failed to write to stdout")?,
    }

    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        _ => {
            let mut buf = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}
