use crate::decl::Thm;
use crate::kernel::{self, Subst};
use crate::{CompileInfo, Compiler, Decl};
use follow_parse::{ErrorKind, TokenKind};
use std::sync::Arc;

const LOGIC: &str = "type Wff Set
term Wff imp(Wff p, Wff q) {(p→q)}
term Wff neg(Wff p) {¬p}
term Wff eq(Set a, Set b) {a=b}
axiom mp(Wff p, Wff q) {
  |- q
  -| p
  -| imp(p, q)
}
axiom ax1(Wff p, Wff q) { |- imp(p, imp(q, p)) }
axiom ne(Set a, Set b) { |- eq(a, b) diff (a, b) }
";

fn compile(text: &str) -> CompileInfo {
    Compiler::default().compile(&format!("{}{}", LOGIC, text))
}

fn kinds(info: &CompileInfo) -> Vec<ErrorKind> {
    info.diagnostics.iter().map(|e| e.kind).collect()
}

fn last_thm(info: &CompileInfo) -> &Arc<Thm> {
    match info.decls().last() {
        Some(Decl::Thm(thm)) => thm,
        _ => panic!("theorem expected"),
    }
}

#[test]
fn double_negation() {
    let text = "type Wff
term Wff neg(Wff p) {¬p}
axiom ax1(Wff p) { |- neg(neg(p)) }";
    let info = Compiler::default().compile(text);
    assert!(info.diagnostics.is_empty());
    assert!(matches!(info.decls()[0], Decl::Type(_)));
    match &info.decls()[1] {
        Decl::Term(tm) => assert_eq!(tm.params.len(), 1),
        _ => panic!("term expected"),
    }
    let rule = match &info.decls()[2] {
        Decl::Axiom(rule) => rule,
        _ => panic!("axiom expected"),
    };
    assert_eq!(rule.targets.len(), 1);
    assert_eq!(rule.targets[0].text, "¬¬p");

    // the root of the target shows its rendered text
    let comments: Vec<_> = info.tokens.iter().filter_map(|t| t.comment.as_deref()).collect();
    assert_eq!(comments, vec!["¬¬p"]);
}

#[test]
fn empty_proof() {
    let info = compile("thm t(Wff p) { |- imp(p, p) } = {}");
    assert_eq!(kinds(&info), vec![ErrorKind::ThmWithoutValidProof]);
    let err = &info.diagnostics[0];
    assert_eq!(info.tokens[err.tok].text, "t");
    assert_eq!(info.tokens[err.tok].error, Some(ErrorKind::ThmWithoutValidProof));
    assert!(!last_thm(&info).valid);
}

#[test]
fn trivial_theorem() {
    let info = compile("thm t() {} = {}");
    assert_eq!(kinds(&info), vec![ErrorKind::TargetMissing]);
    assert!(last_thm(&info).valid);
}

#[test]
fn undefined_rule() {
    let info = compile("thm t(Wff p) { |- imp(p, p) } = { ax(p) }");
    let kinds = kinds(&info);
    let missing = kinds.iter().filter(|k| **k == ErrorKind::AxiomThmDefMissing);
    assert_eq!(missing.count(), 1);
    let head = info.tokens.iter().find(|t| t.text == "ax").unwrap();
    assert_eq!(head.kind, TokenKind::Unresolved);
    assert_eq!(head.error, Some(ErrorKind::AxiomThmDefMissing));
    let thm = last_thm(&info);
    assert!(thm.proof.is_empty());
    assert!(thm.trace.is_empty());

    // rule names starting with `ax`
    let names: Vec<_> = info.suggestions.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(names, vec!["ax1"]);
    assert!(info.suggestions[0].doc.starts_with("axiom ax1(Wff p, Wff q) {"));
}

#[test]
fn omitted_arguments() {
    let info = compile("thm t(Wff p, Wff q) { |- imp(q, p) -| p } = {\n  mp(p)\n}");
    use ErrorKind::*;
    assert_eq!(kinds(&info), vec![ThmWithoutValidProof, TooLessArg, ProofOpUseless]);

    let thm = last_thm(&info);
    let step = &thm.proof[0];
    assert!(step.uses_virtual);
    assert_eq!(step.children[1].key, "?Wff0");
    assert!(step.children[1].virt);
    assert_eq!(step.targets[0].key, "?Wff0");

    // unifying the step target with the theorem target fixes the argument
    let alts = &thm.suggestions[0];
    assert_eq!(alts.len(), 1);
    assert_eq!(alts[0].children[1].key, "imp(q,p)");
    assert_eq!(info.suggestions.len(), 1);
    assert_eq!(info.suggestions[0].text, "mp(p, imp(q,p))");
    assert_eq!(info.suggestions[0].range, step.range);
    assert!(info.suggestions[0].doc.starts_with("mp(p, (q→p)) {\n|- (q→p)\n-| p\n"));
}

#[test]
fn proof_progress() {
    let info = compile("thm t(Wff p, Wff q) { |- imp(q, p) -| p } = {\n  mp(p, imp(q, p))\n  ax1(p, q)\n}");
    assert!(info.diagnostics.is_empty());
    let thm = last_thm(&info);
    assert!(thm.valid);
    let keys: Vec<Vec<_>> = thm
        .trace
        .iter()
        .map(|ts| ts.iter().map(|t| t.key.as_str()).collect())
        .collect();
    assert_eq!(keys, vec![vec!["imp(p,imp(q,p))"], vec![]]);

    let comments: Vec<_> = info
        .tokens
        .iter()
        .filter(|t| matches!(t.kind, TokenKind::AxiomName))
        .filter_map(|t| t.comment.as_deref())
        .collect();
    assert_eq!(comments, vec!["mp => |- (p→(q→p))", "ax1 => Q.E.D."]);
}

#[test]
fn named_virtual() {
    let info = compile("thm t(Wff p, Wff q) { |- imp(q, p) -| p } = {\n  mp(x, imp(q, p))\n  ax1(p, q)\n}");
    use ErrorKind::*;
    assert_eq!(kinds(&info), vec![ThmWithoutValidProof, TermDefMissing, ProofOpUseless]);
    let thm = last_thm(&info);
    assert!(thm.proof[0].children[0].virt);
    assert_eq!(thm.trace[0].len(), 2);

    // `x` is fixed by the outstanding targets `x` and `imp(x, imp(q, p))`
    let sugs = &info.suggestions;
    assert_eq!(sugs.len(), 2);
    assert_eq!(sugs[0].text, "ax1(p, q)");
    assert_eq!(sugs[0].edits[0].old_text, "x");
    assert_eq!(sugs[0].edits[0].new_text, "imp(p,imp(q,p))");
    assert_eq!(sugs[0].edits[0].new_term_text, "(p→(q→p))");
    assert_eq!(sugs[1].edits[0].new_text, "p");
    assert_eq!(sugs[0].edits[0].range.start.line, 12);
    assert!(sugs[1].doc.ends_with("}\nx : p"));
}

#[test]
fn reused_virtual() {
    let text = "thm t(Wff p, Wff q) { |- imp(q, p) -| p } = {
  mp(x, imp(q, p))
  mp(p, x)
  ax1(x, q)
}";
    let info = compile(text);
    use ErrorKind::*;
    assert_eq!(kinds(&info), vec![ThmWithoutValidProof, TermDefMissing, ProofOpUseless]);
    let thm = last_thm(&info);
    let x = &thm.proof[0].children[0];
    assert!(x.virt);
    assert_eq!(thm.proof[1].children[1].key, x.key);

    // fixing `x` rewrites its definition and its uses in earlier steps
    let sug = info.suggestions.iter().find(|s| s.text == "ax1(p, q)").unwrap();
    let starts: Vec<_> = sug
        .edits
        .iter()
        .map(|e| (e.range.start.line, e.range.start.character))
        .collect();
    assert_eq!(starts, vec![(12, 5), (13, 8)]);
    assert!(sug.edits.iter().all(|e| e.old_text == "x" && e.new_text == "p"));
}

#[test]
fn recovered_arguments() {
    let text = "thm t(Set a, Wff p) { |- imp(p, p) } = {\n  ax1(a, imp(p), p)\n}";
    let info = compile(text);
    use ErrorKind::*;
    let expected = vec![
        ThmWithoutValidProof,
        TooManyArg,
        ProofOpUseless,
        ArgTypeError,
        TooLessArg,
    ];
    assert_eq!(kinds(&info), expected);

    // ill-typed and ill-formed arguments become fresh metavariables
    let step = &last_thm(&info).proof[0];
    let keys: Vec<_> = step.children.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["?Wff0", "?Wff1"]);
    assert!(step.children.iter().all(|c| c.virt));
    assert!(step.uses_virtual);
}

#[test]
fn diff_violation() {
    let info = compile("thm t(Set x, Set y) { |- eq(x, y) } = { ne(x, y) }");
    assert_eq!(kinds(&info), vec![ErrorKind::ProofDiffError]);
    let thm = last_thm(&info);
    assert!(thm.valid);
    assert_eq!(thm.proof[0].diff_errors, vec![("x".to_string(), "y".to_string())]);

    let info = compile("thm t(Set x, Set y) { |- eq(x, y) diff (x, y) } = { ne(x, y) }");
    assert!(info.diagnostics.is_empty());

    let info = compile("thm t(Set x) { |- eq(x, x) } = { ne(x, x) }");
    assert_eq!(kinds(&info), vec![ErrorKind::ProofDiffError]);
    let thm = last_thm(&info);
    assert_eq!(thm.proof[0].diff_errors, vec![("x".to_string(), "x".to_string())]);
}

#[test]
fn binding_errors() {
    use ErrorKind::*;
    let info = compile("term Wff imp {x}\nterm Foo f\nterm Wff g(imp p)\naxiom a(Wff p, Wff p) { |- p }");
    assert_eq!(kinds(&info), vec![DupName, TypeDefMissing, NotType, DupArgName]);
    assert_eq!(info.decls().len(), 8);
}

#[test]
fn idempotent() {
    let text = "thm t(Wff p, Wff q) { |- imp(q, p) -| p } = {\n  mp(p)\n  ax1\n}";
    let (a, b) = (compile(text), compile(text));
    assert_eq!(a.diagnostics, b.diagnostics);
    assert_eq!(a.tokens, b.tokens);
    assert_eq!(a.suggestions, b.suggestions);
    let show = |i: &CompileInfo| i.decls().iter().map(|d| d.to_string()).collect::<Vec<_>>();
    assert_eq!(show(&a), show(&b));
}

#[test]
fn unify_identical() {
    let info = compile("");
    for decl in info.decls() {
        if let Some(rule) = decl.as_rule() {
            for tm in rule.targets.iter().chain(rule.assumptions.iter()) {
                assert_eq!(kernel::unify(tm, tm, &Subst::new()), Some(Subst::new()));
            }
        }
    }
}

#[test]
fn constant_round_trip() {
    let info = Compiler::default().compile("type Wff\nterm Wff top\naxiom a() { |- top }");
    let rule = info.decls()[2].as_rule().unwrap();
    assert_eq!(rule.targets[0].text, "top");
    assert_eq!(info.decls()[1].to_string(), "term Wff top {top}");
}
