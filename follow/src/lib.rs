#![forbid(unsafe_code)]

//! Compilation and proof checking for the Follow proof language.
//!
//! A Follow file declares
//! *types* of expressions,
//! *terms* that build expressions of some type,
//! *axioms* stating targets under assumptions, and
//! *theorems* whose proofs apply axioms and earlier theorems.
//!
//! How is a file processed?
//! The file is scanned into tokens and parsed into blocks by [`follow_parse`].
//! Every block is then bound to a compiled declaration ([`Decl`]),
//! resolving names against the [`Symbols`] of the file so far and
//! against previously compiled files ([`Deps`]).
//! Expressions are elaborated to terms ([`TermOp`]),
//! which are compared only by their canonical keys.
//! Finally, the proof of every theorem is replayed:
//! every proof step has to discharge one of the outstanding targets, and
//! steps that do not make progress yield [`Suggestion`]s obtained by unification.
//!
//! ~~~
//! use follow::{Compiler, Decl};
//! let text = "type Wff
//! term Wff imp(Wff p, Wff q) {(p→q)}
//! axiom mp(Wff p, Wff q) { |- q -| p -| imp(p, q) }
//! axiom ax1(Wff p, Wff q) { |- imp(p, imp(q, p)) }
//! thm a1i(Wff p, Wff q) { |- imp(q, p) -| p } = {
//!   mp(p, imp(q, p))
//!   ax1(p, q)
//! }";
//! let info = Compiler::default().compile(text);
//! assert!(info.diagnostics.is_empty());
//! match info.decls().last() {
//!     Some(Decl::Thm(thm)) => assert!(thm.valid),
//!     _ => panic!("theorem expected"),
//! }
//! ~~~
//!
//! Nothing in this library fails on erroneous input:
//! compilation records diagnostics and carries on with a best-effort result.
//!
//! # Organisation
//!
//! * The [`decl`] module contains compiled declarations,
//! * the [`kernel`] module contains unification and proof state transitions, and
//! * the [`lookup`] module answers position queries of editors.

pub mod decl;
pub mod kernel;
pub mod lookup;

mod compile;
mod deps;
pub mod error;
mod fmt;
mod project;
mod scope;
mod symbols;
mod term;

pub use compile::{CompileInfo, Compiler, Suggestion};
pub use decl::Decl;
pub use deps::Deps;
pub use error::Error;
pub use project::Project;
pub use scope::SEARCH_LIMIT;
pub use symbols::Symbols;
pub use term::{Def, TermOp};

#[cfg(test)]
mod tests;
