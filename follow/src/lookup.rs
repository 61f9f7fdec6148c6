//! Lookup of compilation results by source position.
//!
//! Declarations and tokens are ordered by their ranges,
//! so all lookups are binary searches.

use crate::decl::{Decl, Thm};
use crate::TermOp;
use core::cmp::Ordering;
use follow_parse::{Position, Range, Token};
use std::sync::Arc;

/// Declaration whose range contains the position.
pub fn decl_at<'a>(decls: &'a [Decl], pos: &Position) -> Option<&'a Decl> {
    let i = decls.binary_search_by(|d| d.range().locate(pos)).ok()?;
    decls.get(i)
}

/// Token whose range contains the position.
pub fn token_at<'a>(tokens: &'a [Token], pos: &Position) -> Option<&'a Token> {
    let i = tokens.binary_search_by(|t| t.range.locate(pos)).ok()?;
    tokens.get(i)
}

/// Tokens that overlap the range.
pub fn tokens_in<'a>(tokens: &'a [Token], range: &Range) -> &'a [Token] {
    let start = tokens.partition_point(|t| t.range.end.cmp_lc(&range.start) != Ordering::Greater);
    let end = tokens.partition_point(|t| t.range.start.cmp_lc(&range.end) == Ordering::Less);
    &tokens[start..end.max(start)]
}

/// Targets that remain to be proved at a position in a theorem.
///
/// Before the end of the first proof step, these are the targets of the theorem,
/// afterwards, the targets after the last step that ends before the position.
pub fn proof_state_at<'a>(thm: &'a Thm, pos: &Position) -> &'a [Arc<TermOp>] {
    let done = thm
        .proof
        .partition_point(|s| s.range.end.cmp_lc(pos) != Ordering::Greater);
    match done.checked_sub(1) {
        Some(i) => &thm.trace[i],
        None => &thm.rule.targets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Compiler;

    const TEXT: &str = "type Wff
term Wff top
axiom triv() { |- top }
thm t() {
  |- top
} = {
  triv
}";

    #[test]
    fn positions() {
        let info = Compiler::default().compile(TEXT);
        assert!(info.diagnostics.is_empty());

        let pos = Position::new(2, 8, 0);
        assert_eq!(decl_at(info.decls(), &pos).map(|d| d.name().as_str()), Some("triv"));
        let tok = token_at(&info.tokens, &pos).unwrap();
        assert_eq!(tok.text, "triv");
        assert!(decl_at(info.decls(), &Position::new(9, 0, 0)).is_none());

        let line = Range::new(Position::new(2, 0, 0), Position::new(3, 0, 0));
        let words: Vec<_> = tokens_in(&info.tokens, &line)
            .iter()
            .filter(|t| t.kind.is_name())
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(words, vec!["triv", "top"]);

        let thm = match info.decls().last() {
            Some(Decl::Thm(thm)) => thm,
            _ => panic!("theorem expected"),
        };
        assert_eq!(proof_state_at(thm, &Position::new(6, 0, 0)).len(), 1);
        assert!(proof_state_at(thm, &Position::new(6, 6, 0)).is_empty());
    }
}
