// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # msgcodec CLI
//!
//! Command-line tool for producing and inspecting `application/x-bincode`
//! message bodies.
//!
//! ## Usage
//!
//! ```sh
//! # Encode a string into a message body
//! msgcodec encode text "hello" -o hello.bin
//!
//! # Encode an integer with a custom content encoding
//! msgcodec encode int -42 -o answer.bin --encoding US-ASCII
//!
//! # Show the type descriptor and value of a body
//! msgcodec inspect hello.bin
//!
//! # Use converter settings from a TOML file
//! msgcodec --config msgcodec.toml encode bytes image.png -o image.bin
//! ```

mod cmd;
mod common;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use cmd::{EncodeCmd, InspectCmd};
use common::{load_config, Result};

/// msgcodec - bincode message body toolkit
///
/// Encode built-in values into message bodies and inspect existing bodies.
#[derive(Parser, Clone)]
#[command(name = "msgcodec")]
#[command(about = "Encode and inspect application/x-bincode message bodies", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Converter configuration file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Encode a value into a message body (text, int, bytes)
    #[command(subcommand)]
    Encode(EncodeCmd),

    /// Inspect a message body
    Inspect(InspectCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Encode(cmd) => cmd.run(config),
        Commands::Inspect(cmd) => cmd.run(config),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
