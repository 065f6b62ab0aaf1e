//! Stemcell build settings bound from flags and environment variables
//!
//! Every setting is described once in [`BINDINGS`]. The same table drives the
//! clap arguments, the environment lookup and the validation messages.

use crate::error::ConfigError;
use crate::ovftool::ovftool_name;
use clap::{Arg, ArgMatches, Args, Command, FromArgMatches};
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

/// Template used when no VMX directory format is given
pub const DEFAULT_VMX_FORMAT: &str = "vmx-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    VmxDir,
    VmxFormat,
    TempDir,
    StemcellDir,
    StemcellVersion,
    PackerTemplate,
    AdminPassword,
    Executable,
}

/// One row of the settings table
#[derive(Debug, Clone, Copy)]
pub struct Binding {
    pub field: Field,
    pub name: &'static str,
    pub flag: &'static str,
    pub env: &'static str,
    pub description: &'static str,
    pub required: bool,
}

impl Binding {
    /// clap argument for this binding
    pub fn to_arg(&self) -> Arg {
        Arg::new(self.flag)
            .long(self.flag)
            .value_name(self.name)
            .help(format!("{} [env: {}]", self.description, self.env))
    }
}

pub const BINDINGS: &[Binding] = &[
    Binding {
        field: Field::VmxDir,
        name: "VMXDir",
        flag: "vmx",
        env: "STEMCELL_VMX_DIR",
        description: "Directory containing VMX files",
        required: true,
    },
    Binding {
        field: Field::VmxFormat,
        name: "VMXFormat",
        flag: "format",
        env: "STEMCELL_VMX_FORMAT",
        description: "Name format of versioned VMX directories",
        required: false,
    },
    Binding {
        field: Field::TempDir,
        name: "TempDir",
        flag: "temp",
        env: "STEMCELL_TEMP_DIR",
        description: "Optional temp directory for running VMs",
        required: false,
    },
    Binding {
        field: Field::StemcellDir,
        name: "StemcellDir",
        flag: "stemcell",
        env: "STEMCELL_STEMCELL_DIR",
        description: "Directory where stemcell will be saved",
        required: true,
    },
    Binding {
        field: Field::StemcellVersion,
        name: "StemcellVersion",
        flag: "version",
        env: "STEMCELL_STEMCELL_VERSION",
        description: "Stemcell version (NUMBER.NUMBER)",
        required: true,
    },
    Binding {
        field: Field::PackerTemplate,
        name: "PackerTemplate",
        flag: "template",
        env: "STEMCELL_PACKER_TEMPLATE",
        description: "Path to the packer template",
        required: true,
    },
    Binding {
        field: Field::AdminPassword,
        name: "AdminPassword",
        flag: "password",
        env: "STEMCELL_ADMIN_PASSWORD",
        description: "Administrator password of the Windows VM",
        required: true,
    },
    Binding {
        field: Field::Executable,
        name: "Executable",
        flag: "ovftool",
        env: "STEMCELL_OVFTOOL",
        description: "Name of the ovftool executable to locate",
        required: false,
    },
];

/// Raw flag values as parsed by clap, keyed by field
#[derive(Debug, Clone, Default)]
pub struct SettingsArgs {
    values: HashMap<Field, String>,
}

impl SettingsArgs {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Field, String)>,
    {
        Self {
            values: pairs.into_iter().collect(),
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Bind flags over the process environment.
    pub fn bind_env(&self) -> Settings {
        bind(self, |key| env::var(key).ok())
    }
}

impl FromArgMatches for SettingsArgs {
    fn from_arg_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let mut args = Self::default();
        args.update_from_arg_matches(matches)?;
        Ok(args)
    }

    fn update_from_arg_matches(&mut self, matches: &ArgMatches) -> Result<(), clap::Error> {
        for b in BINDINGS {
            if let Some(v) = matches.get_one::<String>(b.flag) {
                self.values.insert(b.field, v.clone());
            }
        }
        Ok(())
    }
}

impl Args for SettingsArgs {
    fn augment_args(cmd: Command) -> Command {
        cmd.args(BINDINGS.iter().map(Binding::to_arg))
    }

    fn augment_args_for_update(cmd: Command) -> Command {
        Self::augment_args(cmd)
    }
}

/// Resolved stemcell settings
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub vmx_dir: String,
    pub vmx_format: String,
    pub temp_dir: String,
    pub stemcell_dir: String,
    pub stemcell_version: String,
    pub packer_template: String,
    #[serde(skip)]
    pub admin_password: String,
    pub executable: String,
}

impl Settings {
    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::VmxDir => &mut self.vmx_dir,
            Field::VmxFormat => &mut self.vmx_format,
            Field::TempDir => &mut self.temp_dir,
            Field::StemcellDir => &mut self.stemcell_dir,
            Field::StemcellVersion => &mut self.stemcell_version,
            Field::PackerTemplate => &mut self.packer_template,
            Field::AdminPassword => &mut self.admin_password,
            Field::Executable => &mut self.executable,
        }
    }

    fn value(&self, field: Field) -> &str {
        match field {
            Field::VmxDir => &self.vmx_dir,
            Field::VmxFormat => &self.vmx_format,
            Field::TempDir => &self.temp_dir,
            Field::StemcellDir => &self.stemcell_dir,
            Field::StemcellVersion => &self.stemcell_version,
            Field::PackerTemplate => &self.packer_template,
            Field::AdminPassword => &self.admin_password,
            Field::Executable => &self.executable,
        }
    }

    /// Fill optional settings that were left empty.
    pub fn set_defaults(&mut self) {
        if self.vmx_format.is_empty() {
            self.vmx_format = DEFAULT_VMX_FORMAT.to_string();
        }
        if self.temp_dir.is_empty() {
            self.temp_dir = env::temp_dir().to_string_lossy().into_owned();
        }
        if self.executable.is_empty() {
            self.executable = ovftool_name().to_string();
        }
    }

    /// All problems with these settings, empty when they are usable.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errs: Vec<ConfigError> = BINDINGS
            .iter()
            .filter(|b| b.required && self.value(b.field).is_empty())
            .map(|b| ConfigError::MissingArgument {
                field: b.name,
                flag: b.flag,
                env: b.env,
            })
            .collect();
        if !self.stemcell_version.is_empty() && !is_stemcell_version(&self.stemcell_version) {
            errs.push(ConfigError::InvalidVersion(self.stemcell_version.clone()));
        }
        errs
    }

    pub fn vmx_dir(&self) -> PathBuf {
        PathBuf::from(&self.vmx_dir)
    }
}

/// Resolve every binding: a non-empty flag wins over a non-empty
/// environment variable. Defaults are applied last.
pub fn bind<E>(flags: &SettingsArgs, env: E) -> Settings
where
    E: Fn(&str) -> Option<String>,
{
    let mut settings = Settings::default();
    for b in BINDINGS {
        let value = flags
            .get(b.field)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .or_else(|| env(b.env).filter(|v| !v.is_empty()));
        if let Some(v) = value {
            *settings.slot(b.field) = v;
        }
    }
    settings.set_defaults();
    settings
}

/// "NUMBER.NUMBER", e.g. "1200.3"
pub fn is_stemcell_version(s: &str) -> bool {
    let is_number = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
    matches!(s.split_once('.'), Some((major, minor)) if is_number(major) && is_number(minor))
}
