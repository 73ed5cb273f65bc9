use argh::FromArgs;
use relayer_db_types::traits::{DatabaseBackend, HeightDatabase};

use crate::{
    cli::OutputFormat,
    errors::{DisplayableError, DisplayedError},
    output::{height::HeightInfo, output},
};

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "get-height")]
/// Get the last processed source-chain height
pub(crate) struct GetHeightArgs {
    /// output format: "porcelain" (default) or "json"
    #[argh(option, short = 'o', default = "OutputFormat::Porcelain")]
    pub(crate) output_format: OutputFormat,
}

pub(crate) fn get_height(
    db: &impl DatabaseBackend,
    args: GetHeightArgs,
) -> Result<(), DisplayedError> {
    let height = db
        .height_db()
        .get_height()
        .internal_error("Failed to read height")?;
    output(&HeightInfo { height }, args.output_format)
}
