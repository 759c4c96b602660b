use std::collections::HashSet;

use swc_core::ecma::ast::Ident;
use swc_core::ecma::visit::Visit;

use crate::module::ScopeBindings;

/// Collects every identifier occurring in a module. An over-approximation of
/// the bound names: picking a dependency map name that avoids all identifier
/// occurrences also avoids all bindings.
pub struct IdentCollector {
    pub idents: HashSet<String>,
}

impl IdentCollector {
    pub fn new() -> Self {
        Self {
            idents: HashSet::new(),
        }
    }
}

impl Default for IdentCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl Visit for IdentCollector {
    fn visit_ident(&mut self, ident: &Ident) {
        self.idents.insert(ident.sym.to_string());
    }
}

impl ScopeBindings for IdentCollector {
    fn has_binding(&self, name: &str) -> bool {
        self.idents.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use swc_core::ecma::visit::VisitWith;

    use super::IdentCollector;
    use crate::ast::tests::TestUtils;

    #[test]
    fn test_collects_bindings_and_references() {
        let collector = run(r#"const a = 1; function f(b) { return c; }"#);
        for name in ["a", "f", "b", "c"] {
            assert!(collector.idents.contains(name), "missing {}", name);
        }
    }

    #[test]
    fn test_member_props_are_not_idents() {
        let collector = run(r#"foo.bar;"#);
        assert!(collector.idents.contains("foo"));
        assert!(!collector.idents.contains("bar"));
    }

    fn run(js_code: &str) -> IdentCollector {
        let test_utils = TestUtils::gen_js_ast(js_code);
        let mut collector = IdentCollector::new();
        test_utils.ast.ast.visit_with(&mut collector);
        collector
    }
}
