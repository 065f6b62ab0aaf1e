//! Settings for a stemcell build

pub mod settings;

pub use settings::{bind, Binding, Field, Settings, SettingsArgs, BINDINGS, DEFAULT_VMX_FORMAT};
