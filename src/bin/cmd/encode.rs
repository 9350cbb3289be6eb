// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Encode command - write a built-in value as a message body.

use std::fs;
use std::path::PathBuf;

use clap::Subcommand;
use serde::Serialize;

use crate::common::{builtin_converter, format_size, output_json_or, Result};
use msgcodec::{ConverterConfig, MessageConverter, MessageProperties, Transportable};

/// Encode a value into a message body file.
#[derive(Subcommand, Clone, Debug)]
pub enum EncodeCmd {
    /// Encode a UTF-8 string
    Text {
        /// Text to encode
        #[arg(value_name = "TEXT")]
        text: String,

        /// Output file for the message body
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Content encoding to set instead of the configured default
        #[arg(long)]
        encoding: Option<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Encode a signed 64-bit integer
    Int {
        /// Integer to encode
        #[arg(value_name = "VALUE", allow_negative_numbers = true)]
        value: i64,

        /// Output file for the message body
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Content encoding to set instead of the configured default
        #[arg(long)]
        encoding: Option<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Encode the raw contents of a file as a byte vector
    Bytes {
        /// File whose contents are encoded
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file for the message body
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Content encoding to set instead of the configured default
        #[arg(long)]
        encoding: Option<String>,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

impl EncodeCmd {
    pub fn run(self, config: ConverterConfig) -> Result<()> {
        match self {
            EncodeCmd::Text {
                text,
                output,
                encoding,
                json,
            } => cmd_encode(&text, output, encoding, json, config),
            EncodeCmd::Int {
                value,
                output,
                encoding,
                json,
            } => cmd_encode(&value, output, encoding, json, config),
            EncodeCmd::Bytes {
                input,
                output,
                encoding,
                json,
            } => {
                let data = fs::read(&input)?;
                cmd_encode(&data, output, encoding, json, config)
            }
        }
    }
}

#[derive(Serialize)]
struct EncodeReport {
    output: String,
    bytes: usize,
    properties: MessageProperties,
}

fn cmd_encode(
    value: &dyn Transportable,
    output: PathBuf,
    encoding: Option<String>,
    json: bool,
    config: ConverterConfig,
) -> Result<()> {
    let converter = builtin_converter(config);

    let mut properties = MessageProperties::new();
    properties.content_encoding = encoding;

    let message = converter.to_message(value, &mut properties)?;
    fs::write(&output, message.body())?;

    let report = EncodeReport {
        output: output.display().to_string(),
        bytes: message.len(),
        properties,
    };

    output_json_or(json, &report, || {
        println!("Wrote {} to {}", format_size(report.bytes), report.output);
        if let Some(ct) = report.properties.content_type() {
            println!("Content-Type: {ct}");
        }
        if let Some(enc) = report.properties.content_encoding() {
            println!("Content-Encoding: {enc}");
        }
        if let Some(id) = report.properties.message_id() {
            println!("Message-Id: {id}");
        }
        Ok(())
    })
}
