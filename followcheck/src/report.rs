//! Printing of compilation results.

use crate::Opt;
use follow::decl::Thm;
use follow::{CompileInfo, Decl, Suggestion};
use follow_parse::Error;

fn suggestion(path: &str, sug: &Suggestion) {
    println!("{}:{}: suggestion: {}", path, sug.range.start, sug.text);
    sug.doc.lines().for_each(|line| println!("  {}", line));
}

fn diagnostic(path: &str, err: &Error) -> String {
    let label = if err.kind.is_syntactic() {
        "syntax error"
    } else {
        "error"
    };
    format!("{}:{}: {}: {}", path, err.range.start, label, err.kind)
}

fn trace(thm: &Thm) {
    println!("{}", thm.rule.name);
    for (step, targets) in thm.proof.iter().zip(thm.trace.iter()) {
        println!("  {}", step);
        if targets.is_empty() {
            println!("    Q.E.D.")
        }
        targets.iter().for_each(|t| println!("    |- {}", t.text));
    }
}

/// Print the results of compiling a file as requested by the options.
pub fn report(path: &str, info: &CompileInfo, opt: &Opt) {
    if opt.quiet {
        return;
    }

    for err in &info.diagnostics {
        println!("{}", diagnostic(path, err))
    }

    for decl in info.decls() {
        if opt.print {
            println!("{}", decl)
        }
        match decl {
            Decl::Thm(thm) if opt.trace => trace(thm),
            _ => (),
        }
    }

    if opt.suggest {
        info.suggestions.iter().for_each(|s| suggestion(path, s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use follow::Compiler;

    #[test]
    fn labels() {
        let info = Compiler::default().compile("type Wff\nterm Wff\nterm Foo f");
        let lines: Vec<_> = info.diagnostics.iter().map(|e| diagnostic("a.fol", e)).collect();
        assert_eq!(
            lines,
            vec![
                "a.fol:2:6: syntax error: name missing",
                "a.fol:3:6: error: undefined type",
            ]
        );
    }
}
