//! Parsing of token streams into blocks.

use crate::ast::{Node, OpNode, Param, RuleNode, TermNode, ThmNode, TypeNode};
use crate::{op, Error, ErrorKind, Keyword, Range, Tok, Token, TokenKind};
use std::collections::BTreeSet;

/// Result of parsing.
#[derive(Debug, Default)]
pub struct Parsed {
    pub nodes: Vec<Node>,
    pub errors: Vec<Error>,
}

/// Parse a token stream into blocks.
///
/// Parsing never fails; every missing piece yields an error
/// and parsing continues with a best-effort default.
/// Word tokens are refined in place to the kind of name they denote.
///
/// ~~~
/// # use follow_parse::{parse, scan, Node};
/// let mut tokens = scan("type Wff\nterm Wff neg(Wff p) {¬p}");
/// let parsed = parse(&mut tokens);
/// assert!(parsed.errors.is_empty());
/// assert!(matches!(parsed.nodes[1], Node::Term(_)));
/// ~~~
pub fn parse(tokens: &mut [Token]) -> Parsed {
    let mut parser = Parser {
        tokens,
        errors: Vec::new(),
    };
    let mut nodes = Vec::new();
    for block in parser.split() {
        let node = match parser.tokens[block[0]].keyword() {
            Some(Keyword::Type) => Some(parser.type_node(&block)),
            Some(Keyword::Term) => parser.term_node(&block).map(Node::Term),
            Some(Keyword::Axiom) => parser.axiom_node(&block),
            Some(Keyword::Thm) => parser.thm_node(&block),
            _ => None,
        };
        nodes.extend(node)
    }
    let errors = parser.errors;
    Parsed { nodes, errors }
}

struct Parser<'t> {
    tokens: &'t mut [Token],
    errors: Vec<Error>,
}

/// Indices of the significant tokens of a block.
type Block = [usize];

impl<'t> Parser<'t> {
    fn tok(&self, i: usize) -> Tok {
        Tok::new(i, &self.tokens[i])
    }

    fn err(&mut self, kind: ErrorKind, i: usize) {
        let tok = self.tok(i);
        self.errors.push(Error::new(kind, &tok))
    }

    fn set_kind(&mut self, i: usize, kind: TokenKind) {
        self.tokens[i].kind = kind
    }

    fn is_word(&self, block: &Block, i: usize) -> bool {
        block.get(i).map_or(false, |&j| self.tokens[j].is_word())
    }

    fn is_sep(&self, block: &Block, i: usize, c: char) -> bool {
        block.get(i).map_or(false, |&j| self.tokens[j].is_sep(c))
    }

    fn range(&self, from: usize, to: usize) -> Range {
        Range::new(self.tokens[from].range.start, self.tokens[to].range.end)
    }

    /// Split tokens into blocks starting with a block keyword,
    /// skipping whitespace and comments.
    fn split(&mut self) -> Vec<Vec<usize>> {
        let mut blocks: Vec<Vec<usize>> = Vec::new();
        for i in 0..self.tokens.len() {
            let token = &self.tokens[i];
            match token.kind {
                TokenKind::Ignore | TokenKind::Comment => continue,
                _ => (),
            }
            if token.keyword().map_or(false, |kw| kw.starts_block()) {
                blocks.push(Vec::from([i]))
            } else if let Some(block) = blocks.last_mut() {
                block.push(i)
            } else {
                self.err(ErrorKind::UnexpectedToken, i)
            }
        }
        blocks
    }

    fn unexpected(&mut self, rest: &Block) {
        rest.iter()
            .for_each(|&i| self.err(ErrorKind::UnexpectedToken, i))
    }

    /// `type A B ...`
    fn type_node(&mut self, block: &Block) -> Node {
        let keyword = self.tok(block[0]);
        let mut names = Vec::new();
        for &i in &block[1..] {
            if self.tokens[i].is_word() {
                self.set_kind(i, TokenKind::TypeName);
                names.push(self.tok(i))
            } else {
                self.err(ErrorKind::UnexpectedToken, i)
            }
        }
        if names.is_empty() {
            self.err(ErrorKind::TypeMissing, block[0])
        }
        let last = block.last().copied().unwrap_or(block[0]);
        let range = self.range(block[0], last);
        Node::Type(TypeNode {
            keyword,
            names,
            range,
        })
    }

    /// Return the end of the parameter list starting at `i`,
    /// that is, the first token that is neither a word nor a comma.
    fn params_end(&self, block: &Block, mut i: usize) -> usize {
        while i < block.len() && (self.is_word(block, i) || self.is_sep(block, i, ',')) {
            i += 1
        }
        i
    }

    /// `T1 x1, T2 x2, ...`
    fn params(&mut self, idxs: &[usize]) -> Vec<Param> {
        let mut params = Vec::new();
        let mut i = 0;
        while i < idxs.len() {
            if !self.tokens[idxs[i]].is_word() {
                self.err(ErrorKind::ParamTypeMissing, idxs[i]);
                i += 1;
                continue;
            }
            self.set_kind(idxs[i], TokenKind::TypeName);
            match idxs.get(i + 1) {
                Some(&j) if self.tokens[j].is_word() => {
                    self.set_kind(j, TokenKind::ArgName);
                    let ty = self.tok(idxs[i]);
                    let name = self.tok(j);
                    params.push(Param { ty, name });
                    i += 2;
                    if i < idxs.len() && self.tokens[idxs[i]].is_sep(',') {
                        i += 1
                    }
                }
                other => {
                    let at = other.copied().unwrap_or(idxs[i]);
                    self.err(ErrorKind::ParamNameMissing, at);
                    i += 2
                }
            }
        }
        params
    }

    /// `term T name [(params)] [{ content }]`
    fn term_node(&mut self, block: &Block) -> Option<TermNode> {
        let kw = block[0];
        if !self.is_word(block, 1) {
            self.err(ErrorKind::TypeMissing, *block.get(1).unwrap_or(&kw));
            return None;
        }
        self.set_kind(block[1], TokenKind::TypeName);
        if !self.is_word(block, 2) {
            self.err(ErrorKind::NameMissing, *block.get(2).unwrap_or(&block[1]));
            return None;
        }
        let (ty, name) = (self.tok(block[1]), self.tok(block[2]));
        let mut last = block[2];

        let mut i = 3;
        let mut params = Vec::new();
        if self.is_sep(block, i, '(') {
            let end = self.params_end(block, i + 1);
            params = self.params(&block[i + 1..end]);
            if self.is_sep(block, end, ')') {
                last = block[end];
                i = end + 1
            } else {
                self.err(ErrorKind::RightParenMissing, block[i]);
                last = block[end - 1];
                i = end
            }
        }

        let mut content = Vec::new();
        if i < block.len() {
            if self.is_sep(block, i, '{') {
                let close = (i + 1..block.len())
                    .rev()
                    .find(|&j| self.tokens[block[j]].is_sep('}'));
                let end = match close {
                    Some(j) => {
                        last = block[j];
                        j
                    }
                    None => {
                        self.err(ErrorKind::RightBraceMissing, block[i]);
                        last = block[block.len() - 1];
                        block.len()
                    }
                };
                content = block[i + 1..end].iter().map(|&j| self.tok(j)).collect();
            } else {
                self.err(ErrorKind::LeftBraceMissing, block[i]);
                last = block[block.len() - 1];
            }
        }

        if params.is_empty() {
            self.set_kind(name.idx, TokenKind::ConstName);
            content
                .iter()
                .for_each(|tok| self.tokens[tok.idx].kind = TokenKind::ConstName);
        } else {
            self.set_kind(name.idx, TokenKind::TermName);
        }
        if content.is_empty() {
            content.push(name.clone())
        }

        Some(TermNode {
            keyword: self.tok(kw),
            ty,
            name,
            params,
            content,
            range: self.range(kw, last),
        })
    }

    /// Parse the part common to axioms and theorems:
    /// `name(params) { body }`.
    ///
    /// Return the rule and the position after it.
    fn rule(&mut self, block: &Block, name_kind: TokenKind) -> Option<(RuleNode, usize)> {
        let kw = block[0];
        if !self.is_word(block, 1) {
            self.err(ErrorKind::NameMissing, *block.get(1).unwrap_or(&kw));
            return None;
        }
        self.set_kind(block[1], name_kind);
        let name = self.tok(block[1]);
        let mut last = block[1];

        let mut i = 2;
        let mut params = Vec::new();
        if self.is_sep(block, i, '(') {
            let end = self.params_end(block, i + 1);
            params = self.params(&block[i + 1..end]);
            if self.is_sep(block, end, ')') {
                last = block[end];
                i = end + 1;
            } else {
                self.err(ErrorKind::RightParenMissing, block[end - 1]);
                last = block[end - 1];
                i = end;
            }
        } else {
            self.err(ErrorKind::LeftParenMissing, block[1]);
        }

        let mut content: &[usize] = &[];
        if i < block.len() {
            let lbrace = block[i];
            if self.is_sep(block, i, '{') {
                i += 1
            } else {
                self.err(ErrorKind::LeftBraceMissing, lbrace)
            }
            let close = (i..block.len()).find(|&j| self.tokens[block[j]].is_sep('}'));
            match close {
                Some(j) => {
                    content = &block[i..j];
                    last = block[j];
                    i = j + 1
                }
                None => {
                    self.err(ErrorKind::RightBraceMissing, lbrace);
                    content = &block[i..];
                    last = block[block.len() - 1];
                    i = block.len()
                }
            }
        } else {
            self.err(ErrorKind::LeftBraceMissing, last)
        }

        let param_names = params.iter().map(|p| p.name.text.clone()).collect();
        let (targets, assumptions, diffs) = self.body(content, &param_names);
        if targets.is_empty() {
            self.err(ErrorKind::TargetMissing, name.idx)
        }

        let rule = RuleNode {
            keyword: self.tok(kw),
            name,
            params,
            targets,
            assumptions,
            diffs,
            range: self.range(kw, last),
        };
        Some((rule, i))
    }

    fn axiom_node(&mut self, block: &Block) -> Option<Node> {
        let (rule, i) = self.rule(block, TokenKind::AxiomName)?;
        self.unexpected(&block[i..]);
        Some(Node::Axiom(rule))
    }

    /// `thm name(params) { body } = { proof }`
    fn thm_node(&mut self, block: &Block) -> Option<Node> {
        let (mut rule, mut i) = self.rule(block, TokenKind::ThmName)?;
        let mut last = None;
        if self.is_sep(block, i, '=') {
            last = Some(block[i]);
            i += 1
        } else {
            self.err(ErrorKind::EqualsMissing, rule.name.idx)
        }

        let mut proof = Vec::new();
        if i < block.len() {
            let lbrace = block[i];
            if self.is_sep(block, i, '{') {
                i += 1
            } else {
                self.err(ErrorKind::LeftBraceMissing, lbrace)
            }
            let close = (i..block.len()).find(|&j| self.tokens[block[j]].is_sep('}'));
            let end = match close {
                Some(j) => j,
                None => {
                    self.err(ErrorKind::RightBraceMissing, lbrace);
                    block.len()
                }
            };
            proof = op::parse(self.tokens, &block[i..end], &mut self.errors);
            last = Some(block[end.min(block.len() - 1)]);
            i = end + 1;
        }
        if let Some(last) = last {
            rule.range = self.range(block[0], last)
        }
        if i < block.len() {
            self.unexpected(&block[i..])
        }
        Some(Node::Thm(ThmNode { rule, proof }))
    }

    /// Split a block body into statements introduced by `|-`, `-|` or `diff`.
    fn body(
        &mut self,
        content: &[usize],
        params: &BTreeSet<String>,
    ) -> (Vec<OpNode>, Vec<OpNode>, Vec<Vec<Tok>>) {
        let mut stmts: Vec<(Keyword, Vec<usize>)> = Vec::new();
        for &i in content {
            match self.tokens[i].keyword() {
                Some(kw @ (Keyword::Target | Keyword::Assume | Keyword::Diff)) => {
                    stmts.push((kw, Vec::from([i])))
                }
                _ => match stmts.last_mut() {
                    Some((_, stmt)) => stmt.push(i),
                    None => self.err(ErrorKind::BodyKeywordMissing, i),
                },
            }
        }

        let (mut targets, mut assumptions, mut diffs) = (Vec::new(), Vec::new(), Vec::new());
        for (kw, stmt) in stmts {
            match kw {
                Keyword::Target | Keyword::Assume => {
                    let ops = op::parse(self.tokens, &stmt[1..], &mut self.errors);
                    let (dst, empty) = if kw == Keyword::Target {
                        (&mut targets, ErrorKind::EmptyTargetBodyStmt)
                    } else {
                        (&mut assumptions, ErrorKind::EmptyAssumeBodyStmt)
                    };
                    if ops.is_empty() {
                        self.err(empty, stmt[0])
                    }
                    dst.extend(ops)
                }
                _ => {
                    let groups = self.diff(&stmt[1..], params);
                    if groups.is_empty() {
                        self.err(ErrorKind::EmptyDiffBodyStmt, stmt[0])
                    }
                    diffs.extend(groups)
                }
            }
        }
        (targets, assumptions, diffs)
    }

    /// `(x, y) (y, z) ...`
    fn diff(&mut self, idxs: &[usize], params: &BTreeSet<String>) -> Vec<Vec<Tok>> {
        let mut groups: Vec<Vec<Tok>> = Vec::new();
        for &i in idxs {
            let token = &self.tokens[i];
            if token.is_sep('(') {
                groups.push(Vec::new());
            } else if token.is_word() {
                if !params.contains(&token.text) {
                    self.err(ErrorKind::DiffNotArg, i);
                    continue;
                }
                self.set_kind(i, TokenKind::ArgName);
                let tok = self.tok(i);
                match groups.last_mut() {
                    Some(group) if group.iter().any(|t| t.text == tok.text) => {
                        self.err(ErrorKind::DupDiff, i)
                    }
                    Some(group) => group.push(tok),
                    None => groups.push(Vec::from([tok])),
                }
            }
        }
        for group in &groups {
            if let [single] = &group[..] {
                let idx = single.idx;
                self.err(ErrorKind::SingleDiff, idx)
            }
        }
        groups.retain(|group| group.len() > 1);
        groups
    }
}

#[cfg(test)]
fn parse_str(s: &str) -> (Vec<Token>, Parsed) {
    let mut tokens = crate::scan(s);
    let parsed = parse(&mut tokens);
    (tokens, parsed)
}

#[cfg(test)]
fn kinds(parsed: &Parsed) -> Vec<ErrorKind> {
    parsed.errors.iter().map(|e| e.kind).collect()
}

#[test]
fn blocks() {
    let text = "type Wff\n\
        term Wff neg(Wff p) {¬p}\n\
        term Wff t\n\
        axiom ax1(Wff p, Wff q) { |- neg(neg(p)) -| q diff (p, q) }\n\
        thm th1(Wff p) { |- p } = { ax1(p) }";
    let (tokens, parsed) = parse_str(text);
    assert!(parsed.errors.is_empty());
    assert_eq!(parsed.nodes.len(), 5);

    match &parsed.nodes[1] {
        Node::Term(tm) => {
            assert_eq!(tm.params.len(), 1);
            assert_eq!(tm.content.len(), 1);
            assert_eq!(tokens[tm.name.idx].kind, TokenKind::TermName);
        }
        _ => panic!("term expected"),
    }
    match &parsed.nodes[2] {
        Node::Term(tm) => {
            assert_eq!(tm.content, vec![tm.name.clone()]);
            assert_eq!(tokens[tm.name.idx].kind, TokenKind::ConstName);
        }
        _ => panic!("term expected"),
    }
    match &parsed.nodes[3] {
        Node::Axiom(ax) => {
            assert_eq!(ax.targets[0].to_string(), "neg(neg(p))");
            assert_eq!(ax.assumptions[0].to_string(), "q");
            assert_eq!(ax.diffs.len(), 1);
        }
        _ => panic!("axiom expected"),
    }
    match &parsed.nodes[4] {
        Node::Thm(thm) => {
            assert_eq!(thm.proof.len(), 1);
            assert_eq!(thm.rule.range.end.offset, text.chars().count());
        }
        _ => panic!("theorem expected"),
    }
}

#[test]
fn recovery() {
    let (_, parsed) = parse_str("x type");
    assert_eq!(kinds(&parsed), vec![ErrorKind::UnexpectedToken, ErrorKind::TypeMissing]);

    let (_, parsed) = parse_str("term Wff");
    assert_eq!(kinds(&parsed), vec![ErrorKind::NameMissing]);
    assert!(parsed.nodes.is_empty());

    let (_, parsed) = parse_str("axiom a(Wff p { |- p");
    assert_eq!(
        kinds(&parsed),
        vec![ErrorKind::RightParenMissing, ErrorKind::RightBraceMissing]
    );
    assert_eq!(parsed.nodes.len(), 1);

    let (_, parsed) = parse_str("axiom a(Wff p) { p |- }");
    assert_eq!(
        kinds(&parsed),
        vec![
            ErrorKind::BodyKeywordMissing,
            ErrorKind::EmptyTargetBodyStmt,
            ErrorKind::TargetMissing
        ]
    );

    let (_, parsed) = parse_str("thm t(Wff p) { |- p } { }");
    assert_eq!(kinds(&parsed), vec![ErrorKind::EqualsMissing]);
    assert_eq!(parsed.nodes.len(), 1);
}

#[test]
fn diffs() {
    let (tokens, parsed) = parse_str("axiom a(Wff p, Wff q) { |- p diff (p, p) (q) (p, r, q) }");
    assert_eq!(
        kinds(&parsed),
        vec![ErrorKind::DupDiff, ErrorKind::DiffNotArg, ErrorKind::SingleDiff, ErrorKind::SingleDiff]
    );
    match &parsed.nodes[0] {
        Node::Axiom(ax) => {
            assert_eq!(ax.diffs.len(), 1);
            let names: Vec<_> = ax.diffs[0].iter().map(|t| t.as_str()).collect();
            assert_eq!(names, vec!["p", "q"]);
            assert_eq!(tokens[ax.diffs[0][1].idx].kind, TokenKind::ArgName);
        }
        _ => panic!("axiom expected"),
    }
}
