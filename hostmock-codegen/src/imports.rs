//! Import collection.

use std::collections::BTreeSet;

use indexmap::IndexMap;

/// Tracks imports and deduplicates them.
///
/// Modules keep insertion order; symbols within a module are sorted, so the
/// same set of `add` calls always renders the same way.
///
/// ```
/// use hostmock_codegen::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add("std::sync", "LazyLock");
/// imports.add("hostmock_runtime", "Value");
/// imports.add("hostmock_runtime", "ApiContext");
///
/// let modules: Vec<_> = imports.iter().map(|(m, _)| m).collect();
/// assert_eq!(modules, ["std::sync", "hostmock_runtime"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    imports: IndexMap<String, BTreeSet<String>>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol import from a module.
    pub fn add(&mut self, module: &str, symbol: &str) {
        self.imports
            .entry(module.to_string())
            .or_default()
            .insert(symbol.to_string());
    }

    /// Add several symbols from one module.
    pub fn add_all<'a>(&mut self, module: &str, symbols: impl IntoIterator<Item = &'a str>) {
        let entry = self.imports.entry(module.to_string()).or_default();
        entry.extend(symbols.into_iter().map(str::to_string));
    }

    /// Iterate over all imports in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.imports.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }
}
