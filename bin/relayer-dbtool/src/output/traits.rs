use serde::Serialize;

/// Objects that can be printed in porcelain form as well as JSON.
pub(crate) trait Formattable: Serialize {
    /// Stable `key: value` lines, one field per line.
    fn format_porcelain(&self) -> String;
}
