pub(crate) mod cast;
pub(crate) mod compile;
pub(crate) mod eval;
pub(crate) mod reconcile;
