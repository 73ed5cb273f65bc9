//! Offline inspection tool for a relayer store.
mod cli;
mod cmd;
mod db;
mod errors;
mod output;

use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Cli, Command},
    cmd::{
        check_tx::get_check_txs,
        gas_subsidy::get_gas_subsidy,
        height::get_height,
        poly_tx::{get_failed_poly_txs, get_poly_tx},
        retry_tx::get_retry_txs,
    },
    db::open_database,
};

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli: Cli = argh::from_env();

    let db = open_database(&cli.datadir).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });

    let result = match cli.cmd {
        Command::GetHeight(args) => get_height(db.as_ref(), args),
        Command::GetCheckTxs(args) => get_check_txs(db.as_ref(), args),
        Command::GetRetryTxs(args) => get_retry_txs(db.as_ref(), args),
        Command::GetPolyTx(args) => get_poly_tx(db.as_ref(), args),
        Command::GetFailedPolyTxs(args) => get_failed_poly_txs(db.as_ref(), args),
        Command::GetGasSubsidy(args) => get_gas_subsidy(db.as_ref(), args),
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
