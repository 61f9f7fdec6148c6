use clap::Parser;
use std::path::PathBuf;

#[derive(Clone, Debug, Parser)]
/// A proof checker for the Follow proof language
pub struct Opt {
    /// Scan and parse files concurrently
    ///
    /// If this option is given with a number n, then
    /// maximally n files are scanned and parsed at the same time.
    /// If this option is given without an extra argument, then
    /// the number of concurrently processed files is
    /// determined automatically from the number of CPUs.
    ///
    /// Binding and proof checking is always sequential,
    /// because every file depends on the files before it.
    #[arg(long, short = 'j')]
    pub jobs: Option<Option<usize>>,

    /// Print compiled declarations
    #[arg(long)]
    pub print: bool,

    /// Print outstanding targets after every proof step
    #[arg(long)]
    pub trace: bool,

    /// Print suggested replacements for proof steps
    #[arg(long)]
    pub suggest: bool,

    /// Print nothing, only signal success via the exit status
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Files to process (cumulative)
    ///
    /// Every file may refer to the declarations of the files before it.
    /// To read from standard input, use "-" as file name.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}
