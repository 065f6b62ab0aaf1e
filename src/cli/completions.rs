//! Shell completion and man page output

use crate::cli::commands::Cli;
use crate::Result;
use clap::CommandFactory;
use clap_complete::{generate, Generator};
use std::io::Write;

/// Write shell completions for the CLI to `out`
pub fn print_completions<G: Generator>(gen: G, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(gen, &mut cmd, name, out);
}

/// Write the man page for the CLI to `out`
pub fn generate_man_page(out: &mut dyn Write) -> Result<()> {
    let man = clap_mangen::Man::new(Cli::command());
    man.render(out)?;
    Ok(())
}
