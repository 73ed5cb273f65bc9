use relayer_db_types::types::PolyTx;
use serde::Serialize;

use super::{
    helpers::{porcelain_field, porcelain_optional},
    traits::Formattable,
};

fn poly_tx_fields(prefix: &str, tx: &PolyTx) -> Vec<String> {
    let key = |field: &str| format!("{prefix}{field}");
    vec![
        porcelain_field(&key("tx_index"), tx.tx_index),
        porcelain_field(&key("tx_hash"), &tx.tx_hash),
        porcelain_field(&key("from_chain_id"), tx.from_chain_id),
        porcelain_field(&key("status"), tx.status),
        porcelain_field(&key("payload_len"), tx.payload.len()),
        porcelain_optional(&key("starcoin_tx_hash"), tx.starcoin_tx_hash.as_deref()),
        porcelain_optional(&key("starcoin_status"), tx.starcoin_status.as_deref()),
        porcelain_field(&key("updated_at"), tx.updated_at),
    ]
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub(crate) struct PolyTxInfo(pub(crate) PolyTx);

impl Formattable for PolyTxInfo {
    fn format_porcelain(&self) -> String {
        poly_tx_fields("", &self.0).join("\n")
    }
}

/// Failed and timed out txs in queue order.
#[derive(Debug, Serialize)]
pub(crate) struct FailedPolyTxs {
    pub(crate) txs: Vec<PolyTx>,
}

impl Formattable for FailedPolyTxs {
    fn format_porcelain(&self) -> String {
        let mut output = vec![porcelain_field("count", self.txs.len())];
        for (i, tx) in self.txs.iter().enumerate() {
            output.extend(poly_tx_fields(&format!("txs[{i}]."), tx));
        }
        output.join("\n")
    }
}
