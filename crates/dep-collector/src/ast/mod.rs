pub mod error;
pub mod js_ast;
pub(crate) mod utils;
