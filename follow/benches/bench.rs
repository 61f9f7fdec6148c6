use criterion::{criterion_group, criterion_main, Criterion};
use follow::{Compiler, Decl};
use follow_parse::{parse, scan};

const LOGIC: &str = "type Wff
term Wff imp(Wff p, Wff q) {(p→q)}
term Wff neg(Wff p) {¬p}
axiom mp(Wff p, Wff q) { |- q -| p -| imp(p, q) }
axiom ax1(Wff p, Wff q) { |- imp(p, imp(q, p)) }
";

/// Generate `n` theorems that are proved by modus ponens.
fn theorems(n: usize) -> String {
    let mut text = String::from(LOGIC);
    for i in 0..n {
        text += &format!(
            "thm a1i{i}(Wff p, Wff q) {{ |- imp(q, neg(p)) -| neg(p) }} = {{\n  mp(neg(p), imp(q, neg(p)))\n  ax1(neg(p), q)\n}}\n"
        );
    }
    text
}

/// Generate `n` theorems whose proof steps omit arguments.
fn incomplete(n: usize) -> String {
    let mut text = String::from(LOGIC);
    for i in 0..n {
        text += &format!("thm t{i}(Wff p, Wff q) {{ |- imp(q, p) -| p }} = {{\n  mp(p)\n  ax1\n}}\n");
    }
    text
}

fn valid(text: &str) -> usize {
    let info = Compiler::default().compile(text);
    let valid = info.decls().iter().filter(|d| match d {
        Decl::Thm(thm) => thm.valid,
        _ => false,
    });
    valid.count()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let thms = theorems(200);
    let incs = incomplete(200);

    c.bench_function("scan", |b| b.iter(|| scan(&thms)));
    c.bench_function("parse", |b| {
        b.iter(|| {
            let mut tokens = scan(&thms);
            parse(&mut tokens)
        })
    });
    c.bench_function("compile", |b| b.iter(|| valid(&thms)));
    c.bench_function("suggest", |b| {
        b.iter(|| Compiler::default().compile(&incs).suggestions.len())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
