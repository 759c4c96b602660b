pub mod ast;
mod module;
mod visitors;

pub use crate::ast::error::{GenerateError, ParseError};
pub use crate::ast::js_ast::JsAst;
pub use crate::module::{
    CollectionResult, Dependency, DependencyRegistry, ResolveType, ScopeBindings,
};
pub use crate::visitors::dep_collector::{collect, InvalidRequireCallError};
pub use crate::visitors::dep_reconciler::{for_optimization, DependencyIndexError};
pub use crate::visitors::ident_collector::IdentCollector;
