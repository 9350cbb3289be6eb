// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect command - show the type descriptor and contents of a message body.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::common::{
    builtin_converter, describe_builtin, format_size, hex_preview, output_json_or, Result,
};
use msgcodec::{
    BincodeMessageConverter, ConversionError, ConverterConfig, Message, MessageProperties,
    CONTENT_TYPE,
};

/// Inspect a message body file.
#[derive(Args, Clone, Debug)]
pub struct InspectCmd {
    /// Message body file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Content type the body was received with
    #[arg(long, default_value = CONTENT_TYPE)]
    content_type: String,

    /// Number of bytes shown in the hex preview
    #[arg(long, default_value_t = 32)]
    preview: usize,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,
}

#[derive(Serialize)]
struct InspectReport {
    file: String,
    content_type: String,
    bytes: usize,
    descriptor: String,
    registered: bool,
    value: Option<String>,
    preview: String,
}

impl InspectCmd {
    pub fn run(self, config: ConverterConfig) -> Result<()> {
        let body = fs::read(&self.input)?;
        let converter = builtin_converter(config);

        let message = Message::new(
            body,
            MessageProperties::new().with_content_type(self.content_type.clone()),
        );

        if !BincodeMessageConverter::is_applicable(&self.content_type) {
            return Err(ConversionError::not_applicable(Some(&self.content_type)).into());
        }

        let (descriptor, registered) = {
            let serializer = converter.serializers().acquire();
            let descriptor = serializer.peek_descriptor(message.body())?;
            let registered = serializer.registry().contains(&descriptor)?;
            (descriptor, registered)
        };

        let value = if registered {
            converter
                .decode(&message)?
                .and_then(|decoded| describe_builtin(decoded.value()))
        } else {
            None
        };

        let report = InspectReport {
            file: self.input.display().to_string(),
            content_type: self.content_type,
            bytes: message.len(),
            descriptor,
            registered,
            value,
            preview: hex_preview(message.body(), self.preview),
        };

        output_json_or(self.json, &report, || {
            println!("=== {} ===", report.file);
            println!("Content-Type: {}", report.content_type);
            println!("Size: {}", format_size(report.bytes));
            println!(
                "Descriptor: {}{}",
                report.descriptor,
                if report.registered { "" } else { " (not a built-in type)" }
            );
            if let Some(value) = &report.value {
                println!("Value: {value}");
            }
            println!("Preview: {}", report.preview);
            Ok(())
        })
    }
}
