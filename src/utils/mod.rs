//! Helpers shared by the scanner, the locator and the CLI

pub mod home;
pub mod paths;
