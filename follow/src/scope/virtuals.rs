//! Metavariables of a single theorem.

use crate::TermOp;
use fnv::FnvHashMap;
use follow_parse::{Param, Range, Tok};
use std::sync::Arc;

/// Metavariables introduced while elaborating the proof of one theorem.
///
/// A fresh table is created for every theorem.
#[derive(Debug, Default)]
pub struct Virtuals {
    index: usize,
    /// metavariables in order of creation
    table: Vec<Arc<TermOp>>,
    by_name: FnvHashMap<String, usize>,
    /// later occurrences of named metavariables
    uses: FnvHashMap<String, Vec<Range>>,
}

impl Virtuals {
    pub fn new() -> Self {
        Default::default()
    }

    /// Return the least name `?<ty><n>` with `n` at least the current index
    /// that does not denote a metavariable yet.
    pub fn next_name(&self, ty: &str) -> String {
        let mut i = self.index;
        loop {
            let name = format!("?{}{}", ty, i);
            if !self.by_name.contains_key(&name) {
                return name;
            }
            i += 1
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<TermOp>> {
        self.by_name.get(name).map(|i| &self.table[*i])
    }

    /// Create a fresh metavariable of the parameter's type.
    ///
    /// `at` is the token the metavariable stems from.
    pub fn fresh(&mut self, at: &Tok, range: Range, param: &Param) -> Arc<TermOp> {
        let name = self.next_name(&param.ty.text);
        let head = Tok::synthetic(at.idx, name, range);
        self.add(TermOp::virt(head, range, param))
    }

    /// Turn an identifier into a metavariable that later occurrences refer to.
    pub fn named(&mut self, head: Tok, range: Range, param: &Param) -> Arc<TermOp> {
        self.add(TermOp::virt(head, range, param))
    }

    fn add(&mut self, tm: TermOp) -> Arc<TermOp> {
        let tm = Arc::new(tm);
        log::trace!("Introduce metavariable {}: {}", tm.key, tm.ty);
        self.by_name.insert(tm.key.clone(), self.table.len());
        self.table.push(tm.clone());
        self.index += 1;
        tm
    }

    /// Record another occurrence of a named metavariable.
    pub fn use_at(&mut self, name: &str, range: Range) {
        self.uses.entry(name.to_string()).or_default().push(range)
    }

    /// All metavariables in order of creation.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<TermOp>> {
        self.table.iter()
    }

    pub fn uses(&self, name: &str) -> &[Range] {
        self.uses.get(name).map(|u| u.as_slice()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::tests::{param, tok};

    #[test]
    fn probe() {
        let mut vs = Virtuals::new();
        let p = param("p");
        assert_eq!(vs.next_name("Wff"), "?Wff0");
        vs.named(tok("?Wff1"), Range::default(), &p);
        // the index is now 1, but `?Wff1` is taken
        assert_eq!(vs.next_name("Wff"), "?Wff2");
        let v = vs.fresh(&tok("mp"), Range::default(), &p);
        assert_eq!(v.key, "?Wff2");
        assert!(v.virt);
        assert_eq!(vs.next_name("Set"), "?Set2");
        assert_eq!(vs.iter().count(), 2);
    }
}
