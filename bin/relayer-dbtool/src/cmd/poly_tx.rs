use argh::FromArgs;
use relayer_db_types::traits::{DatabaseBackend, PolyTxDatabase};

use crate::{
    cli::OutputFormat,
    errors::{DisplayableError, DisplayedError},
    output::{
        output,
        poly_tx::{FailedPolyTxs, PolyTxInfo},
    },
};

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "get-poly-tx")]
/// Get a relayed tx by source hash and chain
pub(crate) struct GetPolyTxArgs {
    /// hex hash of the source-chain tx
    #[argh(positional)]
    pub(crate) tx_hash: String,

    /// id of the source chain
    #[argh(positional)]
    pub(crate) from_chain_id: u64,

    /// output format: "porcelain" (default) or "json"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "get-failed-poly-txs")]
/// List failed and timed out relayed txs
pub(crate) struct GetFailedPolyTxsArgs {
    /// output format: "porcelain" (default) or "json"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

pub(crate) fn get_poly_tx(
    db: &impl DatabaseBackend,
    args: GetPolyTxArgs,
) -> Result<(), DisplayedError> {
    let tx = db
        .poly_tx_db()
        .get_poly_tx(&args.tx_hash, args.from_chain_id)
        .user_error("Failed to look up poly tx")?
        .ok_or_else(|| {
            DisplayedError::UserError(
                "No poly tx found".to_string(),
                Box::new((args.tx_hash.clone(), args.from_chain_id)),
            )
        })?;
    output(&PolyTxInfo(tx), args.output_format)
}

pub(crate) fn get_failed_poly_txs(
    db: &impl DatabaseBackend,
    args: GetFailedPolyTxsArgs,
) -> Result<(), DisplayedError> {
    let txs = db
        .poly_tx_db()
        .get_timed_out_or_failed_poly_tx_list()
        .internal_error("Failed to list failed poly txs")?;
    output(&FailedPolyTxs { txs }, args.output_format)
}
