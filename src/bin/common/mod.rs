// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::any::Any;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use msgcodec::{BincodeMessageConverter, ConverterConfig, TypeRegistry};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Load the converter configuration, falling back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<ConverterConfig> {
    match path {
        Some(path) => Ok(ConverterConfig::from_file(path)?),
        None => Ok(ConverterConfig::default()),
    }
}

/// Converter knowing only the built-in types.
pub fn builtin_converter(config: ConverterConfig) -> BincodeMessageConverter {
    BincodeMessageConverter::with_config(Arc::new(TypeRegistry::with_defaults()), config)
}

/// Format a byte count to a human-readable string.
pub fn format_size(bytes: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = 1024 * KIB;

    if bytes >= MIB {
        format!("{:.2} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.2} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Hex dump of the first `max` bytes, with an ellipsis when truncated.
pub fn hex_preview(bytes: &[u8], max: usize) -> String {
    let shown = &bytes[..bytes.len().min(max)];
    let mut preview = hex::encode(shown);
    if bytes.len() > max {
        preview.push_str("...");
    }
    preview
}

/// Render a decoded built-in value.
pub fn describe_builtin(value: &(dyn Any + Send)) -> Option<String> {
    macro_rules! try_display {
        ($($ty:ty),*) => {
            $(
                if let Some(v) = value.downcast_ref::<$ty>() {
                    return Some(v.to_string());
                }
            )*
        };
    }

    try_display!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, char);

    if let Some(s) = value.downcast_ref::<String>() {
        return Some(format!("{s:?}"));
    }
    if let Some(bytes) = value.downcast_ref::<Vec<u8>>() {
        return Some(format!("[{} bytes] {}", bytes.len(), hex_preview(bytes, 32)));
    }
    if value.downcast_ref::<()>().is_some() {
        return Some("()".to_string());
    }
    None
}

/// Print `value` as pretty JSON, or run the human-readable printer.
pub fn output_json_or<T>(
    json: bool,
    value: &T,
    human_fn: impl FnOnce() -> std::io::Result<()>,
) -> Result<()>
where
    T: Serialize,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human_fn()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KiB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MiB");
    }

    #[test]
    fn test_hex_preview() {
        assert_eq!(hex_preview(&[0xde, 0xad], 4), "dead");
        assert_eq!(hex_preview(&[0xde, 0xad, 0xbe, 0xef], 2), "dead...");
    }

    #[test]
    fn test_describe_builtin() {
        let value: Box<dyn Any + Send> = Box::new(42i64);
        assert_eq!(describe_builtin(value.as_ref()), Some("42".to_string()));

        let value: Box<dyn Any + Send> = Box::new("hi".to_string());
        assert_eq!(describe_builtin(value.as_ref()), Some("\"hi\"".to_string()));

        let value: Box<dyn Any + Send> = Box::new(vec![1u8, 2]);
        assert_eq!(
            describe_builtin(value.as_ref()),
            Some("[2 bytes] 0102".to_string())
        );

        struct Opaque;
        let value: Box<dyn Any + Send> = Box::new(Opaque);
        assert_eq!(describe_builtin(value.as_ref()), None);
    }

    #[test]
    fn test_load_config_default() {
        assert_eq!(load_config(None).unwrap(), ConverterConfig::default());
    }
}
