//! Output formatting for the dbtool.

pub(crate) mod check_tx;
pub(crate) mod gas_subsidy;
pub(crate) mod height;
pub(crate) mod helpers;
pub(crate) mod poly_tx;
pub(crate) mod traits;

pub(crate) use helpers::output;
