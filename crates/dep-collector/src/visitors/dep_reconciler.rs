use anyhow::{anyhow, Result};
use swc_core::common::Span;
use swc_core::ecma::ast::{CallExpr, Expr, Lit, MemberExpr, MemberProp, Module};
use swc_core::ecma::visit::{VisitMut, VisitMutWith};
use thiserror::Error;
use tracing::debug;

use crate::ast::utils::classify_load_call;
use crate::module::CollectionResult;

/// An instrumented call site references an index outside the supplied name
/// list. The tree and the names come from different builds; the caller has
/// to retry with matching artifacts.
#[derive(Debug, Error)]
#[error("dependency index {index} is out of range, only {count} module names were supplied")]
pub struct DependencyIndexError {
    pub index: usize,
    pub count: usize,
    pub span: Span,
}

struct DepReconciler<'a> {
    names: &'a [String],
    dependency_map_name: &'a str,
    referenced: Vec<bool>,
    error: Option<DependencyIndexError>,
}

impl DepReconciler<'_> {
    /// Reads the index out of a call already in instrumented form, i.e. whose
    /// first argument is `<dependency_map_name>[<integer literal>]`.
    fn instrumented_index(&self, call_expr: &CallExpr) -> Option<usize> {
        let arg = call_expr.args.first()?;
        if arg.spread.is_some() {
            return None;
        }
        let Expr::Member(MemberExpr {
            obj,
            prop: MemberProp::Computed(prop),
            ..
        }) = &*arg.expr
        else {
            return None;
        };
        if !matches!(&**obj, Expr::Ident(ident) if ident.sym == *self.dependency_map_name) {
            return None;
        }
        let Expr::Lit(Lit::Num(num)) = &*prop.expr else {
            return None;
        };
        if num.value.fract() != 0.0 || num.value < 0.0 {
            return None;
        }
        Some(num.value as usize)
    }
}

impl VisitMut for DepReconciler<'_> {
    fn visit_mut_call_expr(&mut self, call_expr: &mut CallExpr) {
        if self.error.is_some() {
            return;
        }
        if classify_load_call(call_expr).is_some() {
            if let Some(index) = self.instrumented_index(call_expr) {
                if index >= self.names.len() {
                    self.error = Some(DependencyIndexError {
                        index,
                        count: self.names.len(),
                        span: call_expr.span,
                    });
                    return;
                }
                self.referenced[index] = true;
                // drop the trailing debug specifier, keep the lookup only
                call_expr.args.truncate(1);
            }
        }
        call_expr.visit_mut_children_with(self);
    }
}

/// Secondary pass for production builds: re-walks an already-instrumented
/// tree, strips the trailing specifier arguments, and narrows `names` down to
/// the indices the code still references, in the order of `names`.
pub fn for_optimization(
    module: &mut Module,
    names: &[String],
    dependency_map_name: &str,
) -> Result<CollectionResult> {
    let mut reconciler = DepReconciler {
        names,
        dependency_map_name,
        referenced: vec![false; names.len()],
        error: None,
    };
    module.visit_mut_with(&mut reconciler);
    if let Some(err) = reconciler.error {
        return Err(anyhow!(err));
    }
    let dependencies = names
        .iter()
        .zip(&reconciler.referenced)
        .filter(|(_, referenced)| **referenced)
        .map(|(name, _)| name.clone())
        .collect::<Vec<_>>();
    debug!(
        "reconciled {} of {} dependencies for {}",
        dependencies.len(),
        names.len(),
        dependency_map_name
    );
    Ok(CollectionResult {
        dependency_map_name: dependency_map_name.to_string(),
        dependencies,
    })
}
