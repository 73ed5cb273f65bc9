pub(crate) mod check_tx;
pub(crate) mod gas_subsidy;
pub(crate) mod height;
pub(crate) mod poly_tx;
pub(crate) mod retry_tx;
