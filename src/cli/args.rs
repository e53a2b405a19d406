use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]

/// Holds application-wide command line arguments.
pub struct Args {
    /// DPL source file.
    #[clap(parse(from_os_str), value_name = "FILE")]
    pub sourcefile: PathBuf,

    #[clap(short, long)]
    /// Display the symbol table after analysis.
    pub symbols: bool,

    #[clap(short, long)]
    /// Display the list of tokens.
    pub tokens: bool,

    #[clap(short, long, parse(from_occurrences))]
    /// Sets the level of verbosity, repeat for more output.
    pub verbose: usize,
}

/// Parses arguments
pub(crate) fn parse_args<I, T>(args: I) -> Args
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Args::parse_from(args)
}
