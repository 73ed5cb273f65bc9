use argh::FromArgs;
use relayer_db_types::traits::{DatabaseBackend, GasSubsidyDatabase};

use crate::{
    cli::OutputFormat,
    errors::{DisplayableError, DisplayedError},
    output::{gas_subsidy::GasSubsidyInfo, output},
};

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "get-gas-subsidy")]
/// Get the gas subsidy recorded for a relayed tx
pub(crate) struct GetGasSubsidyArgs {
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

pub(crate) fn gas_subsidy_info(
    db: &impl DatabaseBackend,
    tx_hash: &str,
    from_chain_id: u64,
) -> Result<Option<GasSubsidyInfo>, DisplayedError> {
    let subsidy_db = db.gas_subsidy_db();
    let Some(subsidy) = subsidy_db
        .get_gas_subsidy(tx_hash, from_chain_id)
        .user_error("Failed to look up gas subsidy")?
    else {
        return Ok(None);
    };

    let receiver_subsidy_count = subsidy_db
        .get_gas_subsidy_count_by_to_address(&subsidy.to_address)
        .internal_error("Failed to count subsidies for receiver")?;

    Ok(Some(GasSubsidyInfo {
        subsidy,
        receiver_subsidy_count,
    }))
}

pub(crate) fn get_gas_subsidy(
    db: &impl DatabaseBackend,
    args: GetGasSubsidyArgs,
) -> Result<(), DisplayedError> {
    let info = gas_subsidy_info(db, &args.tx_hash, args.from_chain_id)?.ok_or_else(|| {
        DisplayedError::UserError(
            "No gas subsidy found".to_string(),
            Box::new((args.tx_hash.clone(), args.from_chain_id)),
        )
    })?;
    output(&info, args.output_format)
}
