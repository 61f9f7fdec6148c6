//! Lookup of names in previously compiled files.

use crate::{Decl, Symbols};
use std::sync::Arc;

/// Ordered list of finished symbol tables.
///
/// Names are resolved in the first table that contains them.
#[derive(Clone, Debug, Default)]
pub struct Deps(Vec<Arc<Symbols>>);

impl Deps {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn get(&self, name: &str) -> Option<&Decl> {
        self.0.iter().find_map(|syms| syms.get(name))
    }

    /// Axioms and theorems whose name starts with `prefix`,
    /// in order of the dependencies.
    pub fn search<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a Decl> + 'a {
        self.0.iter().flat_map(move |syms| syms.search(prefix))
    }

    pub fn tables(&self) -> &[Arc<Symbols>] {
        &self.0
    }
}

impl From<Vec<Arc<Symbols>>> for Deps {
    fn from(tables: Vec<Arc<Symbols>>) -> Self {
        Self(tables)
    }
}

impl FromIterator<Arc<Symbols>> for Deps {
    fn from_iter<I: IntoIterator<Item = Arc<Symbols>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
