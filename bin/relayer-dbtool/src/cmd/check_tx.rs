use argh::FromArgs;
use relayer_db_types::{
    event::ChainEvent,
    traits::{CheckTxDatabase, DatabaseBackend},
};

use crate::{
    cli::OutputFormat,
    errors::{DisplayableError, DisplayedError},
    output::{
        check_tx::{EventEntry, EventListing},
        output,
    },
};

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "get-check-txs")]
/// List pending check entries
pub(crate) struct GetCheckTxsArgs {
    /// hex tx hash to start the listing at
    #[argh(option)]
    pub(crate) from: Option<String>,

    /// output format: "porcelain" (default) or "json"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

/// Reads one page of the check set, starting at `from` when given.
pub(crate) fn check_tx_listing(
    db: &impl DatabaseBackend<Event = ChainEvent>,
    from: Option<&str>,
) -> Result<EventListing, DisplayedError> {
    let check_db = db.check_tx_db();
    let page = match from {
        Some(start) => check_db
            .get_check_txs_from(start)
            .user_error(format!("Failed to list check txs from {start}"))?,
        None => check_db
            .get_all_check_txs()
            .internal_error("Failed to list check txs")?,
    };

    let entries = page
        .entries
        .into_iter()
        .map(|(key, entry)| EventEntry {
            key,
            payload: Some(hex::encode(entry.bytes)),
            event: entry.event,
        })
        .collect();

    Ok(EventListing {
        entries,
        next: page.next,
    })
}

pub(crate) fn get_check_txs(
    db: &impl DatabaseBackend<Event = ChainEvent>,
    args: GetCheckTxsArgs,
) -> Result<(), DisplayedError> {
    let listing = check_tx_listing(db, args.from.as_deref())?;
    output(&listing, args.output_format)
}
