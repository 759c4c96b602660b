pub(crate) mod dep_collector;
pub(crate) mod dep_reconciler;
pub(crate) mod ident_collector;
