use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use stemcell_vmx::cli::commands::{Cli, Cmd};
use stemcell_vmx::cli::completions::{generate_man_page, print_completions};
use stemcell_vmx::cli::output::{report, write_json};
use stemcell_vmx::config::{Settings, SettingsArgs};
use stemcell_vmx::error::EntryError;
use stemcell_vmx::ovftool::{ovftool_name, Locator};
use stemcell_vmx::vmx::{read_vmx_dir_with, VmxEntry};

/// JSON printed by `plan`
#[derive(Serialize, Debug)]
struct Plan<'a> {
    generated: String,
    settings: &'a Settings,
    vmx: &'a [VmxEntry],
    latest: &'a VmxEntry,
    ovftool: PathBuf,
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn log_skipped(dir: &Path, err: &EntryError) {
    log::debug!("skipping {}: {}", dir.display(), err);
}

fn scan(dir: &Path, format: &str) -> Result<Vec<VmxEntry>> {
    let entries = read_vmx_dir_with(dir, format, log_skipped)
        .with_context(|| format!("scanning {} with format {format:?}", dir.display()))?;
    log::info!("found {} VMX entries in {}", entries.len(), dir.display());
    Ok(entries)
}

fn locate(name: &str) -> Result<PathBuf> {
    let locator = Locator::default();
    let table = &locator.context().table;
    log::debug!(
        "searching PATH, then {} known files and {} known directories",
        table.files.len(),
        table.dirs.len()
    );
    let (path, source) = locator.locate_with_source(name)?;
    log::debug!("found {} via {}: {}", name, source, path.display());
    Ok(path)
}

fn plan(args: &SettingsArgs) -> Result<()> {
    let settings = args.bind_env();
    let errs = settings.validate();
    if !errs.is_empty() {
        let msg = errs
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n  ");
        return Err(anyhow!("invalid settings:\n  {msg}"));
    }

    let entries = scan(&settings.vmx_dir(), &settings.vmx_format)?;
    let latest = entries
        .last()
        .ok_or_else(|| anyhow!("no VMX entries in {}", settings.vmx_dir))?;
    let ovftool = locate(&settings.executable)?;

    let plan = Plan {
        generated: chrono::Utc::now().to_rfc3339(),
        settings: &settings,
        vmx: &entries,
        latest,
        ovftool,
    };
    write_json(&mut io::stdout(), &plan)
}

fn run(cli: Cli) -> Result<()> {
    match cli.cmd {
        Cmd::Scan { dir, format } => {
            let entries = scan(&dir, &format)?;
            write_json(&mut io::stdout(), &entries)?;
        }

        Cmd::Locate { name } => {
            let name = name.as_deref().unwrap_or(ovftool_name());
            let path = locate(name)?;
            println!("{}", path.display());
        }

        Cmd::Plan { settings } => plan(&settings)?,

        Cmd::Completions { shell } => print_completions(shell, &mut io::stdout()),

        Cmd::ManPage => generate_man_page(&mut io::stdout())?,
    }
    Ok(())
}

/// ---- main ----
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}
