use std::collections::HashSet;

use swc_core::common::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveType {
    Require,
    AsyncRequire,
}

#[derive(Debug, Clone)]
pub struct Dependency {
    pub source: String,
    pub resolve_type: ResolveType,
    pub order: usize,
    pub span: Option<Span>,
}

/// Outcome of one collection or reconciliation pass over a module.
/// `dependencies[i]` is the specifier of the call site rewritten with index `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionResult {
    pub dependency_map_name: String,
    pub dependencies: Vec<String>,
}

/// Scope information supplied by the caller, used to pick a dependency map
/// identifier that collides with nothing already bound in the module.
pub trait ScopeBindings {
    fn has_binding(&self, name: &str) -> bool;
}

impl ScopeBindings for HashSet<String> {
    fn has_binding(&self, name: &str) -> bool {
        self.contains(name)
    }
}

const DEPENDENCY_MAP_BASE: &str = "_dependencyMap";

pub struct DependencyRegistry {
    dependencies: Vec<Dependency>,
}

impl DependencyRegistry {
    pub fn new() -> Self {
        Self {
            dependencies: vec![],
        }
    }

    /// Indices are dense and assigned in encounter order; duplicate sources
    /// get distinct indices, one per call site.
    pub fn register(&mut self, source: String, resolve_type: ResolveType, span: Span) -> usize {
        let order = self.dependencies.len();
        self.dependencies.push(Dependency {
            source,
            resolve_type,
            order,
            span: Some(span),
        });
        order
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn sources(&self) -> Vec<String> {
        self.dependencies
            .iter()
            .map(|dep| dep.source.clone())
            .collect()
    }

    pub fn generate_map_name(bindings: &dyn ScopeBindings) -> String {
        if !bindings.has_binding(DEPENDENCY_MAP_BASE) {
            return DEPENDENCY_MAP_BASE.to_string();
        }
        let mut n = 1;
        loop {
            let candidate = format!("{}{}", DEPENDENCY_MAP_BASE, n);
            if !bindings.has_binding(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

impl Default for DependencyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
