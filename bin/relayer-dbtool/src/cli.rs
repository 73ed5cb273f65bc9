use std::{path::PathBuf, str::FromStr};

use argh::FromArgs;

use crate::cmd::{
    check_tx::GetCheckTxsArgs, gas_subsidy::GetGasSubsidyArgs, height::GetHeightArgs,
    poly_tx::{GetFailedPolyTxsArgs, GetPolyTxArgs},
    retry_tx::GetRetryTxsArgs,
};

/// Inspect the contents of a relayer store.
#[derive(FromArgs, Debug)]
pub(crate) struct Cli {
    /// store directory, or the path of the store itself
    #[argh(option, short = 'd', default = "PathBuf::from(\"data\")")]
    pub(crate) datadir: PathBuf,

    #[argh(subcommand)]
    pub(crate) cmd: Command,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub(crate) enum Command {
    GetHeight(GetHeightArgs),
    GetCheckTxs(GetCheckTxsArgs),
    GetRetryTxs(GetRetryTxsArgs),
    GetPolyTx(GetPolyTxArgs),
    GetFailedPolyTxs(GetFailedPolyTxsArgs),
    GetGasSubsidy(GetGasSubsidyArgs),
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum OutputFormat {
    Porcelain,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "porcelain" => Ok(Self::Porcelain),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format {other}")),
        }
    }
}
