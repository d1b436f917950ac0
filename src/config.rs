//! Where the user's profile fragment lives.
//!
//! The fragment is `$XDG_CONFIG_HOME/rpipe/profile.R`, or
//! `$HOME/.config/rpipe/profile.R` when `XDG_CONFIG_HOME` is unset or empty.

use anyhow::{Result, anyhow};
use std::ffi::OsString;
use std::path::PathBuf;

pub const APP_DIR: &str = "rpipe";
pub const FRAGMENT_FILE: &str = "profile.R";

/// Resolve the configuration home from the raw `XDG_CONFIG_HOME` and `HOME`
/// values.
pub fn config_home(xdg_config_home: Option<OsString>, home: Option<OsString>) -> Result<PathBuf> {
    if let Some(xdg) = xdg_config_home.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(xdg));
    }
    let home = home
        .filter(|v| !v.is_empty())
        .ok_or_else(|| anyhow!("HOME is not set; cannot locate the configuration directory"))?;
    Ok(PathBuf::from(home).join(".config"))
}

/// Path of the profile fragment given the raw environment values.
pub fn fragment_path(xdg_config_home: Option<OsString>, home: Option<OsString>) -> Result<PathBuf> {
    Ok(config_home(xdg_config_home, home)?
        .join(APP_DIR)
        .join(FRAGMENT_FILE))
}

/// Path of the profile fragment from the process environment.
pub fn default_fragment_path() -> Result<PathBuf> {
    fragment_path(
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}
