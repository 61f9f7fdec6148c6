//! Proof state transitions.

use crate::TermOp;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Return the targets that remain after a proof step, or
/// `None` if the step discharges none of the current targets.
///
/// The step's assumptions become new targets,
/// unless they are assumed by the theorem or already pending.
/// New targets come before the targets carried over.
///
/// A step does not necessarily shrink the targets:
/// an assumption equal to a discharged target is pending again,
/// so a rule `|- p -| p` leaves the targets unchanged.
pub fn next_targets(
    current: &[Arc<TermOp>],
    targets: &[Arc<TermOp>],
    assumptions: &[Arc<TermOp>],
    assumed: &BTreeSet<String>,
) -> Option<Vec<Arc<TermOp>>> {
    let proved: BTreeSet<&str> = targets.iter().map(|t| t.key.as_str()).collect();
    if !current.iter().any(|t| proved.contains(t.key.as_str())) {
        return None;
    }
    let rest: Vec<_> = current
        .iter()
        .filter(|t| !proved.contains(t.key.as_str()) && !assumed.contains(&t.key))
        .cloned()
        .collect();

    let mut seen: BTreeSet<&str> = rest.iter().map(|t| t.key.as_str()).collect();
    let mut next = Vec::new();
    for a in assumptions {
        if !assumed.contains(&a.key) && seen.insert(a.key.as_str()) {
            next.push(a.clone())
        }
    }
    next.extend(rest.iter().cloned());
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::tests::{app, decl, var};

    #[test]
    fn progress() {
        let imp = decl("imp", 2);
        let (p, q, r) = (var("p"), var("q"), var("r"));
        let pq = app(&imp, vec![p.clone(), q.clone()]);
        let current = vec![pq.clone(), r.clone()];
        let assumed = BTreeSet::from(["p".to_string()]);

        // modus ponens instance: |- q -| p -| imp(p, q)
        let next = next_targets(&current, &[q.clone()], &[p.clone(), pq.clone()], &assumed);
        assert_eq!(next, None);

        let next = next_targets(&current, &[pq.clone()], &[p, r.clone(), q.clone()], &assumed);
        let keys: Vec<_> = next.unwrap().iter().map(|t| t.key.clone()).collect();
        assert_eq!(keys, vec!["q", "r"]);
    }

    #[test]
    fn monotone() {
        let imp = decl("imp", 2);
        let (p, q) = (var("p"), var("q"));
        let pq = app(&imp, vec![p.clone(), q.clone()]);
        let current = vec![pq.clone(), p.clone()];
        let next = next_targets(&current, &[pq.clone()], &[q], &BTreeSet::new()).unwrap();
        assert!(next.iter().all(|t| t.key != pq.key));
        assert!(next.len() <= current.len());
    }

    #[test]
    fn readded() {
        let (p, q) = (var("p"), var("q"));
        let current = vec![p.clone(), q];
        let next = next_targets(&current, &[p.clone()], &[p.clone()], &BTreeSet::new());
        let keys: Vec<_> = next.unwrap().iter().map(|t| t.key.clone()).collect();
        assert_eq!(keys, vec!["p", "q"]);

        // an assumed key is never pending
        let assumed = BTreeSet::from(["p".to_string()]);
        let next = next_targets(&current, &[p.clone()], &[p], &assumed);
        assert_eq!(next.unwrap().len(), 1);
    }
}
