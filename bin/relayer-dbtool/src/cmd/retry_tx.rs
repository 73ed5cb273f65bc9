use argh::FromArgs;
use relayer_db_types::{
    event::ChainEvent,
    traits::{DatabaseBackend, RetryTxDatabase},
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
#[argh(subcommand, name = "get-retry-txs")]
/// List entries waiting for a retry
pub(crate) struct GetRetryTxsArgs {
    /// hex key to start the listing at
    #[argh(option)]
    pub(crate) from: Option<String>,

    /// output format: "porcelain" (default) or "json"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

/// Reads one page of the retry set, starting at `from` when given.
pub(crate) fn retry_tx_listing(
    db: &impl DatabaseBackend<Event = ChainEvent>,
    from: Option<&str>,
) -> Result<EventListing, DisplayedError> {
    let retry_db = db.retry_tx_db();
    let page = match from {
        Some(start) => {
            let start = hex::decode(start).user_error("Retry key must be hex")?;
            retry_db
                .get_retry_txs_from(&start)
                .internal_error("Failed to list retry txs")?
        }
        None => retry_db
            .get_all_retry_txs()
            .internal_error("Failed to list retry txs")?,
    };

    let entries = page
        .keys
        .into_iter()
        .zip(page.events)
        .map(|(key, event)| EventEntry {
            key: hex::encode(key),
            payload: None,
            event,
        })
        .collect();

    Ok(EventListing {
        entries,
        next: page.next.map(hex::encode),
    })
}

pub(crate) fn get_retry_txs(
    db: &impl DatabaseBackend<Event = ChainEvent>,
    args: GetRetryTxsArgs,
) -> Result<(), DisplayedError> {
    let listing = retry_tx_listing(db, args.from.as_deref())?;
    output(&listing, args.output_format)
}
