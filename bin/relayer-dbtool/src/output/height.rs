use serde::Serialize;

use super::{helpers::porcelain_field, traits::Formattable};

#[derive(Debug, Serialize)]
pub(crate) struct HeightInfo {
    pub(crate) height: u32,
}

impl Formattable for HeightInfo {
    fn format_porcelain(&self) -> String {
        porcelain_field("height", self.height)
    }
}
