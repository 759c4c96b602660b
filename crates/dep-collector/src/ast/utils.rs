use swc_core::common::DUMMY_SP;
use swc_core::ecma::ast::{
    CallExpr, Callee, ComputedPropName, Expr, Ident, Lit, MemberExpr, MemberProp, Number,
};

use crate::module::ResolveType;

/// How a call expression participates in module loading, decided purely by
/// callee shape. A local binding that shadows `require` is still classified;
/// binding-aware classification is a caller concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    Sync,
    Async,
}

impl LoadKind {
    pub fn callee_text(&self) -> &'static str {
        match self {
            LoadKind::Sync => "require",
            LoadKind::Async => "require.async",
        }
    }
}

impl From<LoadKind> for ResolveType {
    fn from(kind: LoadKind) -> Self {
        match kind {
            LoadKind::Sync => ResolveType::Require,
            LoadKind::Async => ResolveType::AsyncRequire,
        }
    }
}

pub fn classify_load_call(call_expr: &CallExpr) -> Option<LoadKind> {
    let Callee::Expr(callee) = &call_expr.callee else {
        return None;
    };
    match &**callee {
        // e.g. require('a')
        Expr::Ident(ident) if is_ident(ident, "require") => Some(LoadKind::Sync),
        // e.g. require.async('a').then(...)
        Expr::Member(MemberExpr {
            obj,
            prop: MemberProp::Ident(prop),
            ..
        }) if prop.sym == *"async"
            && matches!(&**obj, Expr::Ident(ident) if is_ident(ident, "require")) =>
        {
            Some(LoadKind::Async)
        }
        _ => None,
    }
}

pub fn is_ident(ident: &Ident, sym: &str) -> bool {
    ident.sym == *sym
}

pub fn id(s: &str) -> Ident {
    Ident {
        ctxt: Default::default(),
        span: DUMMY_SP,
        sym: s.into(),
        optional: false,
    }
}

/// Builds `<map_name>[<index>]`, the runtime lookup that replaces a literal
/// module specifier.
pub fn dependency_lookup(map_name: &str, index: usize) -> Expr {
    Expr::Member(MemberExpr {
        span: DUMMY_SP,
        obj: Box::new(Expr::Ident(id(map_name))),
        prop: MemberProp::Computed(ComputedPropName {
            span: DUMMY_SP,
            expr: Box::new(Expr::Lit(Lit::Num(Number {
                span: DUMMY_SP,
                value: index as f64,
                raw: None,
            }))),
        }),
    })
}

#[cfg(test)]
mod tests {
    use swc_core::ecma::ast::{Expr, Stmt};

    use super::{classify_load_call, LoadKind};
    use crate::ast::tests::TestUtils;

    #[test]
    fn test_classify() {
        assert_eq!(run(r#"require('a');"#), Some(LoadKind::Sync));
        assert_eq!(run(r#"require.async('a');"#), Some(LoadKind::Async));
        // only the `async` member form is an async load
        assert_eq!(run(r#"require.resolve('a');"#), None);
        // dynamic import is owned by a different part of the bundler
        assert_eq!(run(r#"import('a');"#), None);
        assert_eq!(run(r#"foo.require('a');"#), None);
        assert_eq!(run(r#"load('a');"#), None);
    }

    #[test]
    fn test_classify_ignores_arguments() {
        // classification is independent of argument validity
        assert_eq!(run(r#"require();"#), Some(LoadKind::Sync));
        assert_eq!(run(r#"require(foo);"#), Some(LoadKind::Sync));
    }

    fn run(js_code: &str) -> Option<LoadKind> {
        let test_utils = TestUtils::gen_js_ast(js_code);
        let stmt = test_utils.ast.ast.body[0]
            .as_stmt()
            .unwrap_or_else(|| panic!("expected a statement"));
        let Stmt::Expr(expr_stmt) = stmt else {
            panic!("expected an expression statement");
        };
        let Expr::Call(call_expr) = &*expr_stmt.expr else {
            panic!("expected a call expression");
        };
        classify_load_call(call_expr)
    }
}
