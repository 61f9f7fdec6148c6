//! Elaboration of expressions to terms.

use super::{Binder, Virtuals};
use crate::decl::{Decl, TermDecl};
use crate::TermOp;
use core::cmp::Ordering;
use follow_parse::{ErrorKind, OpNode, Param, Tok, TokenKind};
use std::sync::Arc;

fn find<'p>(params: &'p [Param], name: &str) -> Option<&'p Param> {
    params.iter().find(|p| p.name.text == name)
}

fn name_kind(decl: &TermDecl) -> TokenKind {
    if decl.params.is_empty() {
        TokenKind::ConstName
    } else {
        TokenKind::TermName
    }
}

impl<'a> Binder<'a> {
    fn term_decl(&self, name: &str) -> Option<Arc<TermDecl>> {
        self.get(name).and_then(Decl::as_term).cloned()
    }

    /// Return true if the numbers of arguments agree.
    pub(super) fn check_arity(&mut self, head: &Tok, want: usize, got: usize) -> bool {
        match got.cmp(&want) {
            Ordering::Equal => return true,
            Ordering::Greater => self.err(ErrorKind::TooManyArg, head),
            Ordering::Less => self.err(ErrorKind::TooLessArg, head),
        }
        false
    }

    /// Elaborate an expression over the parameters of a block,
    /// failing on anything that does not resolve.
    pub(super) fn strict(&mut self, op: &OpNode, params: &[Param]) -> Option<Arc<TermOp>> {
        if let Some(param) = find(params, &op.head.text) {
            self.set_kind(&op.head, TokenKind::ArgName);
            if !op.children.is_empty() {
                self.err(ErrorKind::TooManyArg, &op.head);
                return None;
            }
            return Some(Arc::new(TermOp::param(op.head.clone(), op.range, param)));
        }

        let decl = match self.term_decl(&op.head.text) {
            Some(decl) => decl,
            None => {
                self.err(ErrorKind::TermDefMissing, &op.head);
                return None;
            }
        };
        if !self.check_arity(&op.head, decl.params.len(), op.children.len()) {
            return None;
        }
        self.set_kind(&op.head, name_kind(&decl));

        let children: Vec<_> = op.children.iter().map(|c| self.strict(c, params)).collect();
        let typed = children
            .iter()
            .zip(decl.params.iter())
            .all(|(c, p)| c.as_ref().map_or(false, |c| c.ty == p.ty.text));
        if !typed {
            self.err(ErrorKind::ArgTypeError, &op.head);
            return None;
        }
        let children = children.into_iter().flatten().collect();
        Some(Arc::new(TermOp::app(op.head.clone(), op.range, decl, children)))
    }

    /// Elaborate a proof argument that should have the type of `want`.
    ///
    /// Whatever does not resolve becomes a metavariable.
    /// An undefined identifier becomes a metavariable of that name,
    /// which later arguments can refer to.
    pub(super) fn recover(
        &mut self,
        op: &OpNode,
        params: &[Param],
        want: &Param,
        virts: &mut Virtuals,
    ) -> Arc<TermOp> {
        let head = &op.head;
        let fresh = |virts: &mut Virtuals| virts.fresh(head, op.range, want);

        if let Some(param) = find(params, &head.text) {
            self.set_kind(head, TokenKind::ArgName);
            if !op.children.is_empty() {
                self.err(ErrorKind::TooManyArg, head)
            }
            if param.ty.text != want.ty.text {
                self.err(ErrorKind::ArgTypeError, head);
                return fresh(virts);
            }
            return Arc::new(TermOp::param(head.clone(), op.range, param));
        }

        if let Some(v) = virts.get(&head.text).cloned() {
            if v.ty != want.ty.text {
                self.err(ErrorKind::ArgTypeError, head);
                return fresh(virts);
            }
            if !op.children.is_empty() {
                self.err(ErrorKind::TooManyArg, head)
            }
            virts.use_at(&head.text, op.range);
            return v;
        }

        let decl = match self.get(&head.text) {
            None => {
                self.err(ErrorKind::TermDefMissing, head);
                return virts.named(head.clone(), op.range, want);
            }
            Some(decl) => decl.as_term().cloned(),
        };
        let decl = match decl {
            Some(decl) => decl,
            None => {
                self.err(ErrorKind::TermDefMissing, head);
                return fresh(virts);
            }
        };
        if decl.ty.text != want.ty.text {
            self.err(ErrorKind::ArgTypeError, head);
            return fresh(virts);
        }
        if !self.check_arity(head, decl.params.len(), op.children.len()) {
            return fresh(virts);
        }
        self.set_kind(head, name_kind(&decl));

        let children = op
            .children
            .iter()
            .zip(decl.params.iter())
            .map(|(c, p)| self.recover(c, params, p, virts))
            .collect();
        Arc::new(TermOp::app(head.clone(), op.range, decl, children))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Compiler, Decl};
    use follow_parse::ErrorKind;

    const PRELUDE: &str = "type Wff Set
term Wff imp(Wff p, Wff q) {(p→q)}
term Wff neg(Wff p) {¬p}
term Set empty {∅}
";

    fn kinds(text: &str) -> Vec<ErrorKind> {
        let info = Compiler::default().compile(&format!("{}{}", PRELUDE, text));
        info.diagnostics.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn strict_errors() {
        use ErrorKind::*;
        assert_eq!(kinds("axiom a(Wff p) { |- imp(p) }"), vec![TooLessArg]);
        assert_eq!(kinds("axiom a(Wff p) { |- neg(p, p) }"), vec![TooManyArg]);
        assert_eq!(kinds("axiom a(Wff p) { |- neg(x) }"), vec![ArgTypeError, TermDefMissing]);
        assert_eq!(kinds("axiom a(Wff p) { |- neg(empty) }"), vec![ArgTypeError]);
        assert_eq!(kinds("axiom a(Wff p) { |- p(p) }"), vec![TooManyArg]);
        assert_eq!(kinds("axiom a(Wff p) { |- Wff }"), vec![TermDefMissing]);
    }

    #[test]
    fn strict_drops() {
        let text = format!("{}axiom a(Wff p) {{ |- neg(q) }}", PRELUDE);
        let info = Compiler::default().compile(&text);
        assert!(info.decls().iter().all(|d| !matches!(d, Decl::Axiom(_))));
    }

    #[test]
    fn rendered() {
        let text = format!("{}axiom a(Wff p, Wff q) {{ |- imp(neg(p), q) }}", PRELUDE);
        let info = Compiler::default().compile(&text);
        let rule = info.symbols.get("a").and_then(|d| d.as_rule()).unwrap();
        assert_eq!(rule.targets[0].key, "imp(neg(p),q)");
        assert_eq!(rule.targets[0].text, "(¬p→q)");
    }
}
