use relayer_db_types::types::GasSubsidy;
use serde::Serialize;

use super::{helpers::porcelain_field, traits::Formattable};

#[derive(Debug, Serialize)]
pub(crate) struct GasSubsidyInfo {
    #[serde(flatten)]
    pub(crate) subsidy: GasSubsidy,
    /// Subsidies recorded for the same receiver, this one included.
    pub(crate) receiver_subsidy_count: u64,
}

impl Formattable for GasSubsidyInfo {
    fn format_porcelain(&self) -> String {
        let s = &self.subsidy;
        [
            porcelain_field("seq", s.seq),
            porcelain_field("tx_hash", &s.tx_hash),
            porcelain_field("from_chain_id", s.from_chain_id),
            porcelain_field("to_address", &s.to_address),
            porcelain_field("subsidy_amount", s.subsidy_amount),
            porcelain_field("status", s.status),
            porcelain_field("starcoin_tx_hash", hex::encode(&s.starcoin_tx_hash)),
            porcelain_field("sender_address", hex::encode(&s.sender_address)),
            porcelain_field("sender_seq_num", s.sender_seq_num),
            porcelain_field("updated_at", s.updated_at),
            porcelain_field("receiver_subsidy_count", self.receiver_subsidy_count),
        ]
        .join("\n")
    }
}
