//! Candidate substitutions for proof steps that make no progress.

use super::{unify, Subst};
use crate::TermOp;
use core::cmp::Reverse;
use std::collections::BTreeSet;
use std::sync::Arc;

fn virtual_count(sub: &Subst) -> usize {
    sub.values().filter(|tm| tm.virt).count()
}

/// Canonical string of a substitution.
fn signature(sub: &Subst) -> String {
    sub.iter().map(|(k, v)| format!("{}={};", k, v.key)).collect()
}

/// Find substitutions of metavariables that make a proof step
/// discharge one of the current targets.
///
/// Every pair of current target and step target is unified.
/// Every success is then extended by unifying
/// one of the step's assumptions with one of the theorem's assumptions.
/// The result is free of duplicates, and ranks
/// substitutions with more bindings to proper terms first,
/// then those with fewer bindings to metavariables.
pub fn candidates(
    current: &[Arc<TermOp>],
    targets: &[Arc<TermOp>],
    assumptions: &[Arc<TermOp>],
    hyps: &[Arc<TermOp>],
) -> Vec<Subst> {
    let mut found = Vec::new();
    for goal in current {
        for target in targets {
            let sub = match unify(target, goal, &Subst::new()) {
                Some(sub) => sub,
                None => continue,
            };
            let mut extended = Vec::new();
            for a in assumptions {
                for h in hyps {
                    match unify(a, h, &sub) {
                        Some(sub2) if sub2.len() > sub.len() => extended.push(sub2),
                        _ => (),
                    }
                }
            }
            found.push(sub);
            found.append(&mut extended);
        }
    }

    let mut seen = BTreeSet::new();
    found.retain(|sub| seen.insert(signature(sub)));
    found.sort_by_key(|sub| {
        let virts = virtual_count(sub);
        (Reverse(sub.len() - virts), virts)
    });
    log::debug!("Found {} candidates", found.len());
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::tests::{app, decl, var, virt};

    #[test]
    fn ranked() {
        let imp = decl("imp", 2);
        let (p, q) = (var("p"), var("q"));
        let current = vec![app(&imp, vec![p.clone(), q.clone()])];

        // step proving `imp(?a, ?b)` under the assumption `?a`
        let targets = vec![app(&imp, vec![virt("?a"), virt("?b")])];
        let assumptions = vec![virt("?a")];
        let hyps = vec![p.clone()];
        let subs = candidates(&current, &targets, &assumptions, &hyps);
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0]["?a"].key, "p");
        assert_eq!(subs[0]["?b"].key, "q");

        // the assumption extends a partial match, and ranks first
        let targets = vec![app(&imp, vec![virt("?c"), q.clone()]), virt("?d")];
        let assumptions = vec![app(&imp, vec![virt("?d"), virt("?e")])];
        let hyps = vec![app(&imp, vec![q.clone(), p.clone()])];
        let subs = candidates(&current, &targets, &assumptions, &hyps);
        let lens: Vec<_> = subs.iter().map(|s| s.len()).collect();
        assert_eq!(lens, vec![3, 1, 1]);
        assert_eq!(subs[0]["?e"].key, "p");
    }

    #[test]
    fn no_match() {
        let imp = decl("imp", 2);
        let neg = decl("neg", 1);
        let current = vec![app(&neg, vec![var("p")])];
        let targets = vec![app(&imp, vec![virt("?a"), virt("?b")])];
        assert!(candidates(&current, &targets, &[], &[]).is_empty());
    }
}
