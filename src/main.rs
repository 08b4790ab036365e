//! # Cinta CLI
//!
//! Command-line interface for ESC/POS receipt printers.
//!
//! ## Usage
//!
//! ```bash
//! # Print a picture as a raster image
//! cinta --device /dev/usb/lp0 image logo.png
//!
//! # Print it as 24-row bands in page mode instead
//! cinta --device /dev/usb/lp0 image --band logo.png
//!
//! # Barcodes and QR codes
//! cinta barcode --symbology ean13 590123412345
//! cinta --host 192.168.1.100 qr --size 8 "https://example.com"
//!
//! # Run a JSON job (a list of text/feed/cut/pulse/image nodes)
//! cinta job receipt.json
//!
//! # Dump the bytes instead of printing
//! cinta --out job.bin qr "hello"
//!
//! # Ask the printer for its paper status
//! cinta status 4
//! ```
//!
//! Logging is controlled with `RUST_LOG` (default `cinta=info`).

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use cinta::{
    CintaError, CintaResult, PrinterConfig, Session,
    printer::options::{CutOptions, Node, QrOptions},
    protocol::barcode::{
        Symbology,
        qr::{QrErrorLevel, QrModel},
    },
    transport::{DeviceTransport, MemoryTransport, NetworkTransport, Transport, device::DEFAULT_DEVICE},
};

/// Cinta - ESC/POS receipt printer utility
#[derive(Parser, Debug)]
#[command(name = "cinta")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Printer device path
    #[arg(long, global = true, default_value = DEFAULT_DEVICE)]
    device: PathBuf,

    /// Network printer address (host or host:port), used instead of --device
    #[arg(long, global = true, conflicts_with = "out")]
    host: Option<String>,

    /// Write the command bytes to a file instead of a printer
    #[arg(long, global = true, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Printer profile (80mm or 58mm)
    #[arg(long, global = true, default_value = "80mm")]
    printer: PrinterConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a picture (PNG, JPEG, GIF, ...)
    Image {
        file: PathBuf,

        /// Use 24-row bands in page mode instead of a raster image
        #[arg(long)]
        band: bool,

        /// Don't cut after printing
        #[arg(long)]
        no_cut: bool,
    },

    /// Print a 1D barcode
    Barcode {
        data: String,

        /// upc-a, upc-e, ean13, ean8, code39 or code128
        #[arg(long, default_value = "code128")]
        symbology: Symbology,
    },

    /// Print a QR code
    Qr {
        data: String,

        /// Module size in dots (1-16)
        #[arg(long)]
        size: Option<u8>,

        /// Error correction level
        #[arg(long, value_enum, default_value = "m")]
        level: Level,

        /// Use QR model 1 instead of model 2
        #[arg(long)]
        model1: bool,
    },

    /// Run a JSON job file
    Job { file: PathBuf },

    /// Read a status byte (1 printer, 2 offline, 3 error, 4 paper)
    Status {
        #[arg(default_value = "1")]
        n: u8,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Level {
    L,
    M,
    Q,
    H,
}

impl From<Level> for QrErrorLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::L => QrErrorLevel::L,
            Level::M => QrErrorLevel::M,
            Level::Q => QrErrorLevel::Q,
            Level::H => QrErrorLevel::H,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "cinta=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> CintaResult<()> {
    let cli = Cli::parse();

    if let Some(out) = &cli.out {
        if matches!(cli.command, Commands::Status { .. }) {
            return Err(CintaError::InvalidOption(
                "status needs a printer, not --out".to_string(),
            ));
        }

        let mut session = Session::with_config(MemoryTransport::new(), cli.printer);
        execute(&mut session, &cli.command)?;
        let bytes = session.into_transport().into_bytes();
        fs::write(out, &bytes)?;
        println!("Wrote {} bytes to {}", bytes.len(), out.display());
        return Ok(());
    }

    let transport: Box<dyn Transport> = match &cli.host {
        Some(host) => Box::new(NetworkTransport::connect(host)?),
        None => Box::new(DeviceTransport::open(&cli.device)?),
    };
    let mut session = Session::with_config(transport, cli.printer);
    execute(&mut session, &cli.command)?;
    session.flush()
}

fn execute<T: Transport>(session: &mut Session<T>, command: &Commands) -> CintaResult<()> {
    match command {
        Commands::Image { file, band, no_cut } => {
            let image = image::open(file).map_err(|e| {
                CintaError::Image(format!("Failed to open {}: {}", file.display(), e))
            })?;

            session.init()?;
            if *band {
                session.raster_bands(&image)?;
            } else {
                session.raster_image(&image)?;
            }
            if !no_cut {
                session.feed_and_cut(&CutOptions { feed: true })?;
            }
        }

        Commands::Barcode { data, symbology } => {
            session.init()?;
            session.barcode(*symbology, data.as_bytes())?;
            session.linefeed()?;
        }

        Commands::Qr {
            data,
            size,
            level,
            model1,
        } => {
            let options = QrOptions {
                model: if *model1 {
                    QrModel::Model1
                } else {
                    QrModel::Model2
                },
                module_size: size.unwrap_or(session.config().qr_module_size),
                level: (*level).into(),
            };
            session.init()?;
            session.qr_code(data.as_bytes(), &options)?;
            session.linefeed()?;
        }

        Commands::Job { file } => {
            let json = fs::read_to_string(file)?;
            let nodes: Vec<Node> = serde_json::from_str(&json).map_err(|e| {
                CintaError::InvalidOption(format!("{}: {}", file.display(), e))
            })?;

            session.init()?;
            for node in &nodes {
                session.write_node(node)?;
            }
        }

        Commands::Status { n } => {
            let status = session.read_status(*n)?;
            println!("status {}: {:#04x} ({:08b})", n, status, status);
        }
    }

    Ok(())
}
