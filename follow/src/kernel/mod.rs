//! Proof checking: instantiation, unification and proof state.

mod diff;
mod state;
mod suggest;
mod unify;

pub use diff::{diff_pairs, instantiate_diffs, reinstantiate_diffs, violations, DiffMap};
pub use state::next_targets;
pub use suggest::candidates;
pub use unify::{unify, Unifier};

use crate::TermOp;
use std::sync::Arc;

/// Map from variable names to terms.
///
/// The map is persistent, so extending a substitution
/// leaves the original substitution intact.
pub type Subst = im::OrdMap<String, Arc<TermOp>>;

/// Apply a substitution to a term.
pub fn subst(tm: &Arc<TermOp>, sub: &Subst) -> Arc<TermOp> {
    tm.apply_subst(&|key: &str| sub.get(key).cloned())
}
