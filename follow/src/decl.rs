//! Compiled declarations.

use crate::kernel::DiffMap;
use crate::TermOp;
use follow_parse::{Param, Range, Tok};
use std::sync::Arc;

/// Declaration of a type name.
#[derive(Debug)]
pub struct TypeDecl {
    pub name: Tok,
    pub range: Range,
}

/// Fragment of a term template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frag {
    Text(String),
    /// index of a parameter
    Arg(usize),
}

/// Declaration of a term constructor.
#[derive(Debug)]
pub struct TermDecl {
    pub ty: Tok,
    pub name: Tok,
    pub params: Vec<Param>,
    /// text to display for applications of the term
    pub template: Vec<Frag>,
    pub range: Range,
}

impl TermDecl {
    /// Build a template from the content of a term block.
    ///
    /// Content tokens are split into runs of word characters and
    /// runs of other characters, so that in `{¬p}`,
    /// `p` refers to a parameter even without spacing.
    ///
    /// ~~~
    /// # use follow::decl::{Frag, TermDecl};
    /// let t = TermDecl::template(["¬p", "→", "q"], &["p", "q"]);
    /// let text = |s: &str| Frag::Text(s.to_string());
    /// assert_eq!(t, vec![text("¬"), Frag::Arg(0), text("→"), Frag::Arg(1)]);
    /// ~~~
    pub fn template<'a>(content: impl IntoIterator<Item = &'a str>, params: &[&str]) -> Vec<Frag> {
        let mut frags: Vec<Frag> = Vec::new();
        let mut push = |s: &str| match params.iter().position(|p| *p == s) {
            Some(i) => frags.push(Frag::Arg(i)),
            None => match frags.last_mut() {
                Some(Frag::Text(t)) => t.push_str(s),
                _ => frags.push(Frag::Text(s.to_string())),
            },
        };
        for word in content {
            if params.contains(&word) {
                push(word);
            } else {
                split_runs(word).into_iter().for_each(&mut push)
            }
        }
        frags
    }

    /// Render an application of the term to rendered arguments.
    pub fn render(&self, args: &[&str]) -> String {
        let mut s = String::new();
        for frag in &self.template {
            match frag {
                Frag::Text(t) => s.push_str(t),
                Frag::Arg(i) => s.push_str(args.get(*i).copied().unwrap_or("")),
            }
        }
        s
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split a string into maximal runs of word and non-word characters.
fn split_runs(s: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut prev = None;
    for (i, c) in s.char_indices() {
        let w = is_word_char(c);
        if prev.map_or(false, |p| p != w) {
            runs.push(&s[start..i]);
            start = i;
        }
        prev = Some(w);
    }
    if start < s.len() {
        runs.push(&s[start..]);
    }
    runs
}

/// Axiom, or the statement of a theorem.
#[derive(Debug)]
pub struct Rule {
    pub name: Tok,
    pub params: Vec<Param>,
    pub targets: Vec<Arc<TermOp>>,
    pub assumptions: Vec<Arc<TermOp>>,
    /// groups of parameter names that must be instantiated distinctly
    pub diff_groups: Vec<Vec<String>>,
    pub diffs: DiffMap,
    pub range: Range,
}

/// Text edit in the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range,
    pub new_text: String,
    pub old_text: String,
    /// rendered text of the replacement
    pub new_term_text: String,
}

/// Application of an axiom or theorem in a proof.
#[derive(Clone, Debug)]
pub struct ProofStep {
    pub head: Tok,
    pub children: Vec<Arc<TermOp>>,
    pub range: Range,
    pub rule: Arc<Rule>,
    pub targets: Vec<Arc<TermOp>>,
    pub assumptions: Vec<Arc<TermOp>>,
    pub diffs: DiffMap,
    pub uses_virtual: bool,
    /// pairs of the diff relation that the enclosing block does not guarantee
    pub diff_errors: Vec<(String, String)>,
    /// edits of earlier metavariables, only for suggested steps
    pub edits: Vec<TextEdit>,
}

/// Theorem with its proof.
#[derive(Debug)]
pub struct Thm {
    pub rule: Arc<Rule>,
    pub proof: Vec<ProofStep>,
    /// outstanding targets after every proof step
    pub trace: Vec<Vec<Arc<TermOp>>>,
    pub valid: bool,
    /// alternative steps for every proof step that did not make progress
    pub suggestions: Vec<Vec<ProofStep>>,
    /// replacements for proof steps with unknown rule names
    pub name_suggestions: Vec<crate::Suggestion>,
}

/// Compiled declaration.
#[derive(Clone, Debug)]
pub enum Decl {
    Type(Arc<TypeDecl>),
    Term(Arc<TermDecl>),
    Axiom(Arc<Rule>),
    Thm(Arc<Thm>),
}

impl Decl {
    pub fn name(&self) -> &Tok {
        match self {
            Self::Type(ty) => &ty.name,
            Self::Term(tm) => &tm.name,
            Self::Axiom(rule) => &rule.name,
            Self::Thm(thm) => &thm.rule.name,
        }
    }

    pub fn range(&self) -> Range {
        match self {
            Self::Type(ty) => ty.range,
            Self::Term(tm) => tm.range,
            Self::Axiom(rule) => rule.range,
            Self::Thm(thm) => thm.rule.range,
        }
    }

    pub fn as_term(&self) -> Option<&Arc<TermDecl>> {
        match self {
            Self::Term(tm) => Some(tm),
            _ => None,
        }
    }

    /// Return the rule if the declaration can be applied in a proof.
    pub fn as_rule(&self) -> Option<&Arc<Rule>> {
        match self {
            Self::Axiom(rule) => Some(rule),
            Self::Thm(thm) => Some(&thm.rule),
            Self::Type(_) | Self::Term(_) => None,
        }
    }
}

#[test]
fn runs() {
    assert_eq!(split_runs("¬p"), vec!["¬", "p"]);
    assert_eq!(split_runs("max"), vec!["max"]);
    assert_eq!(split_runs("(p→q_1)"), vec!["(", "p", "→", "q_1", ")"]);
    assert_eq!(split_runs(""), Vec::<&str>::new());
}

#[test]
fn render() {
    let tok = |s: &str| Tok::synthetic(0, s.to_string(), Range::default());
    let param = |ty: &str, x: &str| Param {
        ty: tok(ty),
        name: tok(x),
    };
    let params = vec![param("Wff", "p"), param("Wff", "q")];
    let template = TermDecl::template(["(", "p", "→", "q", ")"], &["p", "q"]);
    let imp = TermDecl {
        ty: tok("Wff"),
        name: tok("imp"),
        params,
        template,
        range: Range::default(),
    };
    assert_eq!(imp.render(&["a", "¬b"]), "(a→¬b)");

    let max = TermDecl::template(["max", "a"], &["a"]);
    assert_eq!(max, vec![Frag::Text("max".into()), Frag::Arg(0)]);
}
