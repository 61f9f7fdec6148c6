//! Binding of parsed blocks to compiled declarations.
//!
//! The binder resolves every name of a block against the symbols
//! declared so far (first the current file, then the dependencies),
//! refines the kinds of the tokens it resolves, and
//! records a diagnostic for everything it cannot resolve.

mod elab;
mod proof;
mod virtuals;

pub use virtuals::Virtuals;

use crate::decl::{Decl, Rule, TermDecl, TypeDecl};
use crate::kernel::diff_pairs;
use crate::{Deps, Symbols, TermOp};
use follow_parse::ast::{RuleNode, TermNode, ThmNode, TypeNode};
use follow_parse::{Error, ErrorKind, Node, OpNode, Param, Tok, Token, TokenKind};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Maximal number of rule names suggested for an unknown rule.
pub const SEARCH_LIMIT: usize = 5;

pub(crate) struct Binder<'a> {
    deps: &'a Deps,
    symbols: Symbols,
    tokens: &'a mut [Token],
    errors: Vec<Error>,
    search_limit: usize,
}

impl<'a> Binder<'a> {
    pub fn new(deps: &'a Deps, tokens: &'a mut [Token], search_limit: usize) -> Self {
        Self {
            deps,
            symbols: Symbols::new(),
            tokens,
            errors: Vec::new(),
            search_limit,
        }
    }

    /// Return the declared symbols and the diagnostics.
    pub fn finish(self) -> (Symbols, Vec<Error>) {
        (self.symbols, self.errors)
    }

    fn get(&self, name: &str) -> Option<&Decl> {
        self.symbols.get(name).or_else(|| self.deps.get(name))
    }

    fn err(&mut self, kind: ErrorKind, tok: &Tok) {
        self.errors.push(Error::new(kind, tok))
    }

    fn set_kind(&mut self, tok: &Tok, kind: TokenKind) {
        if let Some(token) = self.tokens.get_mut(tok.idx) {
            token.kind = kind
        }
    }

    fn set_comment(&mut self, tok: &Tok, comment: String) {
        if let Some(token) = self.tokens.get_mut(tok.idx) {
            token.comment = Some(comment)
        }
    }

    fn insert(&mut self, decl: Decl) {
        let name = decl.name().clone();
        if self.symbols.insert(decl).is_err() {
            self.err(ErrorKind::DupName, &name)
        }
    }

    pub fn bind(&mut self, node: &Node) {
        match node {
            Node::Type(ty) => self.type_node(ty),
            Node::Term(tm) => self.term_node(tm),
            Node::Axiom(ax) => self.axiom_node(ax),
            Node::Thm(thm) => self.thm_node(thm),
        }
    }

    /// Return true if the name may be introduced.
    fn fresh_name(&mut self, name: &Tok) -> bool {
        if name.text == "diff" {
            self.err(ErrorKind::DiffIsKeyword, name);
            false
        } else if self.get(&name.text).is_some() {
            self.err(ErrorKind::DupName, name);
            false
        } else {
            true
        }
    }

    /// Return true if the token refers to a declared type.
    fn check_type(&mut self, ty: &Tok) -> bool {
        match self.get(&ty.text) {
            Some(Decl::Type(_)) => true,
            Some(_) => {
                self.err(ErrorKind::NotType, ty);
                false
            }
            None => {
                self.err(ErrorKind::TypeDefMissing, ty);
                false
            }
        }
    }

    /// Check the parameters of a block, stopping at the first problem.
    fn check_params(&mut self, params: &[Param]) -> bool {
        let mut seen = BTreeSet::new();
        for param in params {
            if !self.check_type(&param.ty) || !self.fresh_name(&param.name) {
                return false;
            }
            if !seen.insert(param.name.text.as_str()) {
                self.err(ErrorKind::DupArgName, &param.name);
                return false;
            }
        }
        true
    }

    fn type_node(&mut self, node: &TypeNode) {
        for name in &node.names {
            if self.fresh_name(name) {
                let ty = TypeDecl {
                    name: name.clone(),
                    range: node.range,
                };
                self.insert(Decl::Type(Arc::new(ty)))
            }
        }
    }

    fn term_node(&mut self, node: &TermNode) {
        if !self.check_type(&node.ty) || !self.fresh_name(&node.name) {
            return;
        }
        if !self.check_params(&node.params) {
            return;
        }
        let names: Vec<&str> = node.params.iter().map(|p| p.name.as_str()).collect();
        for tok in &node.content {
            if names.contains(&tok.as_str()) {
                self.set_kind(tok, TokenKind::ArgName)
            }
        }
        let template = TermDecl::template(node.content.iter().map(|t| t.as_str()), &names);
        let tm = TermDecl {
            ty: node.ty.clone(),
            name: node.name.clone(),
            params: node.params.clone(),
            template,
            range: node.range,
        };
        self.insert(Decl::Term(Arc::new(tm)))
    }

    /// Compile the statement of an axiom or theorem.
    ///
    /// Fail if any target or assumption cannot be elaborated.
    fn rule(&mut self, node: &RuleNode) -> Option<Rule> {
        if !self.fresh_name(&node.name) || !self.check_params(&node.params) {
            return None;
        }
        let mut stmts = |ops: &[OpNode]| -> Option<Vec<Arc<TermOp>>> {
            let mut out = Vec::new();
            for op in ops {
                let tm = self.strict(op, &node.params)?;
                self.set_comment(&tm.head, tm.text.clone());
                out.push(tm)
            }
            Some(out)
        };
        let targets = stmts(&node.targets)?;
        let assumptions = stmts(&node.assumptions)?;

        let diff_groups: Vec<Vec<String>> = node
            .diffs
            .iter()
            .map(|group| group.iter().map(|t| t.text.clone()).collect())
            .collect();
        let diffs = diff_pairs(&diff_groups);
        Some(Rule {
            name: node.name.clone(),
            params: node.params.clone(),
            targets,
            assumptions,
            diff_groups,
            diffs,
            range: node.range,
        })
    }

    fn axiom_node(&mut self, node: &RuleNode) {
        if let Some(rule) = self.rule(node) {
            self.insert(Decl::Axiom(Arc::new(rule)))
        }
    }

    fn thm_node(&mut self, node: &ThmNode) {
        let rule = match self.rule(&node.rule) {
            Some(rule) => Arc::new(rule),
            None => return,
        };
        let thm = self.prove(rule, &node.proof);
        if !thm.valid {
            self.err(ErrorKind::ThmWithoutValidProof, &thm.rule.name)
        }
        self.insert(Decl::Thm(Arc::new(thm)))
    }
}
