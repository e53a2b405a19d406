use super::args::{parse_args, Args};
use super::logging;
use crate::Script;
use anyhow::{Context, Result};
use log::info;
use std::ffi::OsString;
use std::fs;
use std::io::Write;

/// Main dplc entrypoint.
pub fn main<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = parse_args(args);

    logging::setup_logger(args.verbose, "dplc")?;
    info!("Parsed arguments:\n{:#?}", &args);

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    Dplc { args }.run(&mut handle)
}

struct Dplc {
    args: Args,
}

impl Dplc {
    fn run(&self, mut output: &mut dyn Write) -> Result<()> {
        let source = self.read_source()?;

        let script = Script::new(&source)?;

        if self.args.tokens {
            Self::list_tokens(&source, output)?;
        }

        if self.args.symbols {
            write!(output, "{}", script.symbol_table())?;
        }

        script.evaluate(&mut output)?;

        Ok(())
    }

    fn read_source(&self) -> Result<String> {
        let path = &self.args.sourcefile;

        let source = fs::read_to_string(path)
            .with_context(|| format!("Unable to read {}", path.display()))?;

        Ok(crate::normalize_newlines(&source))
    }

    fn list_tokens(source: &str, output: &mut dyn Write) -> Result<()> {
        for token in crate::tokenize(source)? {
            writeln!(output, "{}", token)?;
        }

        Ok(())
    }
}
