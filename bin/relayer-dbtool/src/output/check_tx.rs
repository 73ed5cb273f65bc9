//! Check set and retry set listings.

use relayer_db_types::event::ChainEvent;
use serde::Serialize;

use super::{
    helpers::{porcelain_field, porcelain_optional},
    traits::Formattable,
};

#[derive(Debug, Serialize)]
pub(crate) struct EventEntry {
    /// Hex key of the entry.
    pub(crate) key: String,
    /// Raw payload stored alongside the event, check set only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) payload: Option<String>,
    pub(crate) event: ChainEvent,
}

/// One page of check or retry entries.
#[derive(Debug, Serialize)]
pub(crate) struct EventListing {
    pub(crate) entries: Vec<EventEntry>,
    /// Where the next page starts, if the listing was capped.
    pub(crate) next: Option<String>,
}

impl Formattable for EventListing {
    fn format_porcelain(&self) -> String {
        let mut output = vec![porcelain_field("count", self.entries.len())];
        for (i, entry) in self.entries.iter().enumerate() {
            let prefix = format!("entries[{i}]");
            output.push(porcelain_field(&format!("{prefix}.key"), &entry.key));
            if let Some(payload) = &entry.payload {
                output.push(porcelain_field(&format!("{prefix}.payload"), payload));
            }
            output.push(porcelain_field(
                &format!("{prefix}.event.block_number"),
                entry.event.block_number,
            ));
            output.push(porcelain_field(
                &format!("{prefix}.event.transaction_hash"),
                &entry.event.transaction_hash,
            ));
            output.push(porcelain_field(
                &format!("{prefix}.event.type_tag"),
                &entry.event.type_tag,
            ));
            output.push(porcelain_field(
                &format!("{prefix}.event.data"),
                hex::encode(&entry.event.data),
            ));
        }
        output.push(porcelain_optional("next", self.next.as_deref()));
        output.join("\n")
    }
}
