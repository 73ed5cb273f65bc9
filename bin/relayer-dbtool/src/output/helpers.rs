use std::{
    fmt::Display,
    io::{self, Write},
};

use super::traits::Formattable;
use crate::{
    cli::OutputFormat,
    errors::{DisplayableError, DisplayedError},
};

/// Formats one porcelain line.
pub(crate) fn porcelain_field(key: &str, value: impl Display) -> String {
    format!("{key}: {value}")
}

pub(crate) fn porcelain_optional(key: &str, value: Option<impl Display>) -> String {
    match value {
        Some(value) => porcelain_field(key, value),
        None => porcelain_field(key, "none"),
    }
}

/// Writes `data` to `writer` in the requested format.
pub(crate) fn output_to<T: Formattable>(
    data: &T,
    format: OutputFormat,
    writer: &mut impl Write,
) -> Result<(), DisplayedError> {
    let rendered = match format {
        OutputFormat::Porcelain => data.format_porcelain(),
        OutputFormat::Json => {
            serde_json::to_string_pretty(data).internal_error("failed to serialize output")?
        }
    };
    writeln!(writer, "{rendered}").internal_error("failed to write output")
}

/// Writes `data` to stdout.
pub(crate) fn output<T: Formattable>(data: &T, format: OutputFormat) -> Result<(), DisplayedError> {
    output_to(data, format, &mut io::stdout().lock())
}
