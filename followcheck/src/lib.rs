//! Checking of Follow files from the command line.

mod error;
mod opt;
mod path_read;
pub mod report;

pub use error::Error;
pub use opt::Opt;
pub use path_read::PathRead;

use follow::{CompileInfo, Compiler, Deps, Symbols};
use follow_parse::{parse, scan, Parsed, Token};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::sync::Arc;

fn scan_parse(pr: &PathRead) -> (Vec<Token>, Parsed) {
    let mut tokens = scan(&pr.text);
    let parsed = parse(&mut tokens);
    log::info!("Parse {}: {} blocks", pr.path, parsed.nodes.len());
    (tokens, parsed)
}

/// Compile files in order, each file seeing the files before it.
///
/// If `parallel` is set, all files are scanned and parsed concurrently
/// before they are compiled.
/// The callback receives every file together with its compilation result.
pub fn compile<F>(files: &[PathRead], parallel: bool, mut f: F)
where
    F: FnMut(&PathRead, &CompileInfo),
{
    let parsed: Vec<_> = if parallel {
        files.par_iter().map(scan_parse).collect()
    } else {
        files.iter().map(scan_parse).collect()
    };

    let mut tables: Vec<Arc<Symbols>> = Vec::new();
    for (pr, (tokens, parsed)) in files.iter().zip(parsed) {
        log::info!("Compile {}", pr.path);
        let compiler = Compiler::new(Deps::from(tables.clone()));
        let info = compiler.compile_parsed(tokens, parsed);
        f(pr, &info);
        tables.push(info.symbols);
    }
}

/// Check the files given by the options and print results.
///
/// Returns the total number of diagnostics.
pub fn run(opt: &Opt) -> Result<usize, Error> {
    let files: Vec<_> = PathRead::from_pathbufs(&opt.files).collect::<Result<_, _>>()?;
    let mut diagnostics = 0;
    compile(&files, opt.jobs.is_some(), |pr, info| {
        report::report(&pr.path, info, opt);
        diagnostics += info.diagnostics.len();
    });
    Ok(diagnostics)
}
