use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;

use sim8086::{decode_all, render_listing, I8086Decoder, ListingConfig};
use sim8086_disasm::{default_out_path, load_raw_bin, records};

#[derive(Parser, Debug)]
#[command(author, version, about = "8086 disassembler CLI", long_about = None)]
struct Cli {
    /// Input binary path
    #[arg(value_name = "BINFILE")]
    input: PathBuf,
    /// Output file (default: <BINFILE>.asm)
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
    /// Print to stdout instead of writing a file
    #[arg(long, conflicts_with = "out")]
    stdout: bool,
    /// Skip N bytes at start of file before decoding
    #[arg(long, default_value_t = 0usize)]
    skip: usize,
    /// Limit bytes decoded (default: to EOF after --skip)
    #[arg(long)]
    len: Option<usize>,
    /// Output format: text or json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Show instruction bytes (text format only)
    #[arg(long)]
    show_bytes: bool,
    /// Show buffer offsets (text format only)
    #[arg(long)]
    offsets: bool,
    /// Omit the `bits 16` directive (text format only)
    #[arg(long)]
    no_header: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat { Text, Json }

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let bytes = load_raw_bin(&cli.input, cli.skip, cli.len)?;
    let decoded = decode_all(&I8086Decoder::new(), &bytes)?;
    info!(instructions = decoded.len(), bytes = bytes.len(), "decoded {}", cli.input.display());

    let text = match cli.format {
        OutputFormat::Text => {
            let cfg = ListingConfig { header: !cli.no_header, offsets: cli.offsets, show_bytes: cli.show_bytes };
            render_listing(&decoded, &bytes, &cfg)
        }
        OutputFormat::Json => serde_json::to_string_pretty(&records(&decoded, &bytes))?,
    };

    if cli.stdout {
        println!("{text}");
    } else {
        let path = cli.out.unwrap_or_else(|| default_out_path(&cli.input));
        std::fs::write(&path, text)?;
        info!("wrote {}", path.display());
    }
    Ok(())
}
