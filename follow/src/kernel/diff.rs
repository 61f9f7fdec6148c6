//! Diff relations, i.e. pairs of names that must be instantiated distinctly.

use super::Subst;
use std::collections::{BTreeMap, BTreeSet};

/// Symmetric relation stored with every pair `(a, b)` normalised to `a <= b`.
pub type DiffMap = BTreeMap<String, BTreeSet<String>>;

fn insert(map: &mut DiffMap, a: &str, b: &str) {
    let (a, b) = if a <= b { (a, b) } else { (b, a) };
    map.entry(a.to_string()).or_default().insert(b.to_string());
}

/// Relate all pairs of distinct members of every group.
///
/// ~~~
/// # use follow::kernel::diff_pairs;
/// let groups = vec![vec!["y".to_string(), "x".to_string(), "z".to_string()]];
/// let map = diff_pairs(&groups);
/// assert_eq!(map["x"].len(), 2);
/// assert_eq!(map["y"].len(), 1);
/// ~~~
pub fn diff_pairs(groups: &[Vec<String>]) -> DiffMap {
    let mut map = DiffMap::new();
    for group in groups {
        for (i, a) in group.iter().enumerate() {
            group[i + 1..].iter().for_each(|b| insert(&mut map, a, b))
        }
    }
    map
}

/// Instantiate the diff groups of a rule with its arguments.
///
/// Every member of a group is replaced by the leaves of its argument,
/// and the leaves of different members are related pairwise.
pub fn instantiate_diffs(groups: &[Vec<String>], sub: &Subst) -> DiffMap {
    let mut map = DiffMap::new();
    for group in groups {
        let leaves: Vec<BTreeSet<String>> = group
            .iter()
            .filter_map(|x| sub.get(x).map(|tm| tm.leaves()))
            .collect();
        for (i, li) in leaves.iter().enumerate() {
            for lj in &leaves[i + 1..] {
                for a in li {
                    lj.iter().for_each(|b| insert(&mut map, a, b))
                }
            }
        }
    }
    map
}

/// Apply a substitution to an instantiated diff relation.
///
/// Names that the substitution does not map are kept.
pub fn reinstantiate_diffs(diffs: &DiffMap, sub: &Subst) -> DiffMap {
    let leaves = |x: &String| match sub.get(x) {
        Some(tm) => tm.leaves(),
        None => BTreeSet::from([x.clone()]),
    };
    let mut map = DiffMap::new();
    for (a, bs) in diffs {
        let la = leaves(a);
        for b in bs {
            let lb = leaves(b);
            for x in &la {
                lb.iter().for_each(|y| insert(&mut map, x, y))
            }
        }
    }
    map
}

/// Return the pairs of a required diff relation that
/// the declared relation of a block does not guarantee.
///
/// A pair relating a name to itself is always violated.
/// Otherwise, only pairs of block parameters are checked.
pub fn violations(
    required: &DiffMap,
    declared: &DiffMap,
    params: &BTreeSet<String>,
) -> Vec<(String, String)> {
    let mut errs = Vec::new();
    for (a, bs) in required {
        if bs.contains(a) {
            errs.push((a.clone(), a.clone()))
        }
        if !params.contains(a) {
            continue;
        }
        for b in bs.iter().filter(|b| *b != a && params.contains(*b)) {
            if !declared.get(a).map_or(false, |d| d.contains(b)) {
                errs.push((a.clone(), b.clone()))
            }
        }
    }
    errs
}

#[test]
fn violated() {
    let s = |x: &str| x.to_string();
    let params = BTreeSet::from([s("x"), s("y"), s("z")]);
    let declared = diff_pairs(&[vec![s("x"), s("y")]]);

    let required = diff_pairs(&[vec![s("y"), s("x")]]);
    assert!(violations(&required, &declared, &params).is_empty());

    let required = diff_pairs(&[vec![s("x"), s("z"), s("c")]]);
    assert_eq!(violations(&required, &declared, &params), vec![(s("x"), s("z"))]);

    let mut required = DiffMap::new();
    insert(&mut required, "x", "x");
    assert_eq!(violations(&required, &declared, &params), vec![(s("x"), s("x"))]);
}
