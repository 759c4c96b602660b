use anyhow::{anyhow, Result};
use swc_core::common::Span;
use swc_core::ecma::ast::{CallExpr, Expr, Lit, Module};
use swc_core::ecma::utils::ExprFactory;
use swc_core::ecma::visit::{VisitMut, VisitMutWith};
use thiserror::Error;
use tracing::debug;

use crate::ast::utils::{classify_load_call, dependency_lookup, LoadKind};
use crate::module::{CollectionResult, DependencyRegistry, ScopeBindings};

/// A load call whose module specifier cannot be reduced to a compile-time
/// string. Fatal for the whole pass on this module; the caller renders the
/// diagnostic from the span.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct InvalidRequireCallError {
    pub message: String,
    pub span: Span,
}

impl InvalidRequireCallError {
    fn new(message: &str, span: Span) -> Self {
        Self {
            message: message.to_string(),
            span,
        }
    }
}

fn extract_specifier(call_expr: &CallExpr, kind: LoadKind) -> Result<String, InvalidRequireCallError> {
    let span = call_expr.span;
    let Some(arg) = call_expr.args.first() else {
        return Err(InvalidRequireCallError::new(
            &format!(
                "calls to `{}` expect exactly one string literal argument",
                kind.callee_text()
            ),
            span,
        ));
    };
    if arg.spread.is_some() {
        return Err(InvalidRequireCallError::new(
            &format!(
                "calls to `{}` do not accept spread arguments",
                kind.callee_text()
            ),
            span,
        ));
    }
    match &*arg.expr {
        Expr::Lit(Lit::Str(str_)) => Ok(str_.value.to_string()),
        // e.g. require(`left-pad`), equivalent to the plain string form
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => Ok(tpl
            .quasis
            .iter()
            .map(|quasi| {
                quasi
                    .cooked
                    .as_ref()
                    .map_or_else(|| quasi.raw.to_string(), |cooked| cooked.to_string())
            })
            .collect::<String>()),
        Expr::Tpl(_) => Err(InvalidRequireCallError::new(
            "template literals with expressions cannot be resolved at compile time",
            span,
        )),
        Expr::TaggedTpl(_) => Err(InvalidRequireCallError::new(
            "tagged template literals cannot be resolved at compile time",
            span,
        )),
        _ => Err(InvalidRequireCallError::new(
            "the module specifier is not a compile-time string",
            span,
        )),
    }
}

struct DepCollector<'a> {
    registry: &'a mut DependencyRegistry,
    dependency_map_name: &'a str,
    error: Option<InvalidRequireCallError>,
}

impl VisitMut for DepCollector<'_> {
    fn visit_mut_call_expr(&mut self, call_expr: &mut CallExpr) {
        if self.error.is_some() {
            return;
        }
        if let Some(kind) = classify_load_call(call_expr) {
            let source = match extract_specifier(call_expr, kind) {
                Ok(source) => source,
                Err(err) => {
                    self.error = Some(err);
                    return;
                }
            };
            let index = self
                .registry
                .register(source.clone(), kind.into(), call_expr.span);
            debug!(
                "collected {:?} as {}[{}]",
                source, self.dependency_map_name, index
            );
            // require("a") -> require(_dependencyMap[0], "a")
            // moving the original argument to the tail keeps its span and raw
            // text for debugging and for the later optimization pass
            let lookup = dependency_lookup(self.dependency_map_name, index).as_arg();
            let original = std::mem::replace(&mut call_expr.args[0], lookup);
            call_expr.args.push(original);
        }
        call_expr.visit_mut_children_with(self);
    }
}

/// Primary pass: collects every load call's specifier in traversal order and
/// rewrites the calls in place to index into the generated dependency map.
pub fn collect(module: &mut Module, bindings: &dyn ScopeBindings) -> Result<CollectionResult> {
    let dependency_map_name = DependencyRegistry::generate_map_name(bindings);
    let mut registry = DependencyRegistry::new();
    let mut collector = DepCollector {
        registry: &mut registry,
        dependency_map_name: &dependency_map_name,
        error: None,
    };
    module.visit_mut_with(&mut collector);
    if let Some(err) = collector.error {
        return Err(anyhow!(err));
    }
    debug!(
        "collected {} dependencies into {}",
        registry.dependencies().len(),
        dependency_map_name
    );
    Ok(CollectionResult {
        dependencies: registry.sources(),
        dependency_map_name,
    })
}
