//! Unification of terms with metavariables.

use super::Subst;
use crate::TermOp;
use fnv::FnvHashMap;
use std::collections::BTreeSet;
use std::sync::Arc;

/// State of a unification problem.
///
/// Besides the substitution of metavariables by terms, we record
/// classes of metavariables that were identified with each other, and
/// for every metavariable the metavariables occurring in its binding.
/// The latter forbids cyclic bindings.
#[derive(Clone, Debug, Default)]
pub struct Unifier {
    pub subst: Subst,
    classes: Vec<BTreeSet<String>>,
    deps: FnvHashMap<String, BTreeSet<String>>,
}

impl Unifier {
    pub fn new(subst: Subst) -> Self {
        Self {
            subst,
            ..Self::default()
        }
    }

    fn class(&self, v: &str) -> Option<usize> {
        self.classes.iter().position(|c| c.contains(v))
    }

    fn same_class(&self, a: &str, b: &str) -> bool {
        a == b || self.class(a).map_or(false, |i| self.classes[i].contains(b))
    }

    /// Members of the class of `v`, or just `v` if it has no class.
    fn members<'a>(&'a self, v: &'a str) -> Vec<&'a str> {
        match self.class(v) {
            Some(i) => self.classes[i].iter().map(|w| w.as_str()).collect(),
            None => Vec::from([v]),
        }
    }

    /// Return true if `parent` depends on `child`, directly or transitively.
    ///
    /// Metavariables of the same class count as one node.
    fn depends(&self, parent: &str, child: &str) -> bool {
        let mut seen = BTreeSet::new();
        let mut todo = self.members(parent);
        while let Some(p) = todo.pop() {
            if !seen.insert(p) {
                continue;
            }
            for c in self.deps.get(p).into_iter().flatten() {
                if self.same_class(c, child) {
                    return true;
                }
                todo.extend(self.members(c))
            }
        }
        false
    }

    /// Binding of a metavariable or of any metavariable in its class.
    fn binding(&self, v: &str) -> Option<Arc<TermOp>> {
        if let Some(tm) = self.subst.get(v) {
            return Some(tm.clone());
        }
        let i = self.class(v)?;
        self.classes[i]
            .iter()
            .find_map(|w| self.subst.get(w).cloned())
    }

    fn merge(&mut self, a: &str, b: &str) {
        match (self.class(a), self.class(b)) {
            (None, None) => self
                .classes
                .push(BTreeSet::from([a.to_string(), b.to_string()])),
            (Some(i), None) => {
                self.classes[i].insert(b.to_string());
            }
            (None, Some(j)) => {
                self.classes[j].insert(a.to_string());
            }
            (Some(i), Some(j)) if i != j => {
                let cj = self.classes.remove(j);
                let i = if j < i { i - 1 } else { i };
                self.classes[i].extend(cj)
            }
            (Some(_), Some(_)) => (),
        }
    }

    /// Bind the metavariable `v` to the term `tm`.
    fn bind(&mut self, v: &TermOp, tm: &Arc<TermOp>) -> bool {
        let vs = tm.virtuals();
        if vs
            .iter()
            .any(|w| self.same_class(&v.key, w) || self.depends(w, &v.key))
        {
            log::trace!("Cyclic binding {} := {}", v.key, tm.key);
            return false;
        }
        match self.binding(&v.key) {
            Some(old) => {
                if !self.unify(Some(&old), Some(tm)) {
                    return false;
                }
            }
            None => {
                log::trace!("Bind {} := {}", v.key, tm.key);
                self.subst.insert(v.key.clone(), tm.clone());
            }
        }
        self.deps.entry(v.key.clone()).or_default().extend(vs);
        true
    }

    /// Unify two terms, where an absent term unifies with everything.
    pub fn unify(&mut self, current: Option<&Arc<TermOp>>, target: Option<&Arc<TermOp>>) -> bool {
        let (c, t) = match (current, target) {
            (Some(c), Some(t)) => (c, t),
            _ => return true,
        };
        match (c.virt, t.virt) {
            (true, true) => {
                if c.key == t.key {
                    return true;
                }
                if self.depends(&c.key, &t.key) || self.depends(&t.key, &c.key) {
                    return false;
                }
                let (bc, bt) = (self.binding(&c.key), self.binding(&t.key));
                if !self.unify(bc.as_ref(), bt.as_ref()) {
                    return false;
                }
                self.merge(&c.key, &t.key);
                true
            }
            (true, false) => self.bind(c, t),
            (false, true) => self.bind(t, c),
            (false, false) => {
                c.head.text == t.head.text
                    && c.children.len() == t.children.len()
                    && c.children
                        .iter()
                        .zip(t.children.iter())
                        .all(|(c, t)| self.unify(Some(c), Some(t)))
            }
        }
    }

    /// Resolve the substitution through the classes of metavariables.
    ///
    /// A class with a bound member maps all its members to that binding;
    /// otherwise, all members map to the least member of the class.
    /// `nodes` has to contain every metavariable occurring in the problem.
    pub fn finish(mut self, nodes: &FnvHashMap<String, Arc<TermOp>>) -> Subst {
        for class in &self.classes {
            match class.iter().find_map(|v| self.subst.get(v).cloned()) {
                Some(tm) => class.iter().for_each(|v| {
                    self.subst.insert(v.clone(), tm.clone());
                }),
                None => {
                    let rep = match class.iter().next().and_then(|r| nodes.get(r)) {
                        Some(rep) => rep.clone(),
                        None => continue,
                    };
                    class.iter().filter(|v| **v != rep.key).for_each(|v| {
                        self.subst.insert(v.clone(), rep.clone());
                    })
                }
            }
        }
        resolve(self.subst)
    }
}

/// Substitute the substitution into itself until nothing changes.
fn resolve(mut sub: Subst) -> Subst {
    for _ in 0..=sub.len() {
        let next: Subst = sub
            .iter()
            .map(|(k, v)| (k.clone(), super::subst(v, &sub)))
            .collect();
        let changed = next
            .values()
            .zip(sub.values())
            .any(|(a, b)| !Arc::ptr_eq(a, b));
        sub = next;
        if !changed {
            break;
        }
    }
    sub
}

/// Unify `current` with `target`, extending the substitution `base`.
///
/// Return the resolved substitution on success.
pub fn unify(current: &Arc<TermOp>, target: &Arc<TermOp>, base: &Subst) -> Option<Subst> {
    let mut nodes = FnvHashMap::default();
    let mut add = |v: &Arc<TermOp>| {
        nodes.entry(v.key.clone()).or_insert_with(|| v.clone());
    };
    current.visit_virtuals(&mut add);
    target.visit_virtuals(&mut add);
    base.values().for_each(|tm| tm.visit_virtuals(&mut add));

    let mut u = Unifier::new(base.clone());
    if !u.unify(Some(current), Some(target)) {
        return None;
    }
    Some(u.finish(&nodes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::tests::{app, decl, var, virt};

    #[test]
    fn identical() {
        let imp = decl("imp", 2);
        let tm = app(&imp, vec![var("p"), app(&imp, vec![var("q"), var("p")])]);
        assert_eq!(unify(&tm, &tm, &Subst::new()), Some(Subst::new()));
    }

    #[test]
    fn bind() {
        let imp = decl("imp", 2);
        let current = app(&imp, vec![virt("?Wff0"), var("q")]);
        let target = app(&imp, vec![var("p"), var("q")]);
        let sub = unify(&current, &target, &Subst::new()).unwrap();
        assert_eq!(sub.len(), 1);
        assert_eq!(sub["?Wff0"].key, "p");

        let target = app(&imp, vec![var("p"), var("r")]);
        assert_eq!(unify(&current, &target, &Subst::new()), None);
    }

    #[test]
    fn occurs() {
        let neg = decl("neg", 1);
        let v = virt("?Wff0");
        assert_eq!(unify(&v, &app(&neg, vec![v.clone()]), &Subst::new()), None);
    }

    #[test]
    fn classes() {
        let imp = decl("imp", 2);
        let current = app(&imp, vec![virt("?a"), virt("?a")]);
        let target = app(&imp, vec![virt("?b"), var("p")]);
        let sub = unify(&current, &target, &Subst::new()).unwrap();
        assert_eq!(sub["?a"].key, "p");
        assert_eq!(sub["?b"].key, "p");

        let current = app(&imp, vec![virt("?b"), virt("?c")]);
        let target = app(&imp, vec![virt("?c"), virt("?a")]);
        let sub = unify(&current, &target, &Subst::new()).unwrap();
        assert_eq!(sub.len(), 2);
        assert_eq!(sub["?b"].key, "?a");
        assert_eq!(sub["?c"].key, "?a");
    }

    #[test]
    fn transitive() {
        let imp = decl("imp", 2);
        let neg = decl("neg", 1);
        // ?a := neg(?b), then ?b := imp(?a, p) would be cyclic
        let current = app(&imp, vec![virt("?a"), virt("?b")]);
        let target = app(
            &imp,
            vec![
                app(&neg, vec![virt("?b")]),
                app(&imp, vec![virt("?a"), var("p")]),
            ],
        );
        assert_eq!(unify(&current, &target, &Subst::new()), None);
    }

    #[test]
    fn aliased_cycle() {
        let f = decl("f", 3);
        let imp = decl("imp", 2);
        let neg = decl("neg", 1);
        // ?a := neg(?c) and ?c = ?b, so ?b := imp(?a, p) closes a cycle
        let current = app(&f, vec![virt("?a"), virt("?c"), virt("?b")]);
        let target = app(
            &f,
            vec![
                app(&neg, vec![virt("?c")]),
                virt("?b"),
                app(&imp, vec![virt("?a"), var("p")]),
            ],
        );
        assert_eq!(unify(&current, &target, &Subst::new()), None);
        assert_eq!(unify(&target, &current, &Subst::new()), None);
    }
}
