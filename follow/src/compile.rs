//! Compilation of whole files.

use crate::decl::{Decl, ProofStep, TextEdit};
use crate::scope::{Binder, SEARCH_LIMIT};
use crate::{Deps, Symbols};
use follow_parse::{parse, scan, Error, Parsed, Range, Token};
use std::sync::Arc;

/// Replacement offered to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Suggestion {
    /// range of the text to replace
    pub range: Range,
    /// replacement text
    pub text: String,
    /// description of the replacement
    pub doc: String,
    /// further edits to apply together with the replacement
    pub edits: Vec<TextEdit>,
}

impl Suggestion {
    /// Suggest to replace a proof step by an alternative step.
    pub fn replace(step: &ProofStep, alt: &ProofStep) -> Self {
        let keys: Vec<_> = alt.children.iter().map(|c| c.key.as_str()).collect();
        let texts: Vec<_> = alt.children.iter().map(|c| c.text.as_str()).collect();

        let mut doc = Vec::from([format!("{}({}) {{", step.head, texts.join(", "))]);
        doc.extend(alt.targets.iter().map(|t| format!("|- {}", t.text)));
        doc.extend(alt.assumptions.iter().map(|a| format!("-| {}", a.text)));
        if !alt.diff_errors.is_empty() {
            let pairs: Vec<_> = alt
                .diff_errors
                .iter()
                .map(|(a, b)| format!("({},{})", a, b))
                .collect();
            doc.push(format!("diff {}", pairs.join(" ")));
        }
        doc.push("}".to_string());
        let edits = alt.edits.iter();
        doc.extend(edits.map(|e| format!("{} : {}", e.old_text, e.new_term_text)));

        Self {
            range: step.range,
            text: format!("{}({})", step.head, keys.join(", ")),
            doc: doc.join("\n"),
            edits: alt.edits.clone(),
        }
    }
}

/// Result of compiling a file.
#[derive(Debug)]
pub struct CompileInfo {
    pub symbols: Arc<Symbols>,
    /// parse and binding diagnostics, ordered by position
    pub diagnostics: Vec<Error>,
    /// tokens with refined kinds, comments and errors
    pub tokens: Vec<Token>,
    pub suggestions: Vec<Suggestion>,
}

impl CompileInfo {
    pub fn decls(&self) -> &[Decl] {
        self.symbols.decls()
    }
}

/// Compiler for files that may refer to previously compiled files.
#[derive(Clone, Debug)]
pub struct Compiler {
    deps: Deps,
    /// maximal number of rule names suggested for an unknown rule
    pub search_limit: usize,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(Deps::new())
    }
}

impl Compiler {
    pub fn new(deps: Deps) -> Self {
        Self {
            deps,
            search_limit: SEARCH_LIMIT,
        }
    }

    /// Scan, parse and bind a file.
    ///
    /// Compilation never fails; problems are reported as diagnostics.
    ///
    /// ~~~
    /// # use follow::Compiler;
    /// let text = "type Wff
    /// term Wff neg(Wff p) {¬p}
    /// axiom ax1(Wff p) { |- neg(neg(p)) }";
    /// let info = Compiler::default().compile(text);
    /// assert!(info.diagnostics.is_empty());
    /// assert_eq!(info.decls().len(), 3);
    /// ~~~
    pub fn compile(&self, text: &str) -> CompileInfo {
        let mut tokens = scan(text);
        let parsed = parse(&mut tokens);
        self.compile_parsed(tokens, parsed)
    }

    /// Bind a file that was already scanned and parsed.
    pub fn compile_parsed(&self, mut tokens: Vec<Token>, parsed: Parsed) -> CompileInfo {
        let mut binder = Binder::new(&self.deps, &mut tokens, self.search_limit);
        parsed.nodes.iter().for_each(|node| binder.bind(node));
        let (symbols, errors) = binder.finish();

        let mut diagnostics = parsed.errors;
        diagnostics.extend(errors);
        diagnostics.sort_by(Error::cmp_pos);
        for err in &diagnostics {
            if let Some(token) = tokens.get_mut(err.tok) {
                token.error.get_or_insert(err.kind);
            }
        }

        let suggestions = suggestions(&symbols);
        log::debug!(
            "Compiled {} declarations with {} diagnostics",
            symbols.len(),
            diagnostics.len()
        );
        CompileInfo {
            symbols: Arc::new(symbols),
            diagnostics,
            tokens,
            suggestions,
        }
    }
}

/// Suggestions of all theorems, in order of their proof steps.
fn suggestions(symbols: &Symbols) -> Vec<Suggestion> {
    let mut out = Vec::new();
    for decl in symbols.decls() {
        let thm = match decl {
            Decl::Thm(thm) => thm,
            _ => continue,
        };
        out.extend(thm.name_suggestions.iter().cloned());
        for (step, alts) in thm.proof.iter().zip(thm.suggestions.iter()) {
            out.extend(alts.iter().map(|alt| Suggestion::replace(step, alt)))
        }
    }
    out
}
