//! Startup profile for the R session: the bootstrap template followed by the
//! user's own fragment.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempPath};

/// Environment variable through which the bootstrap finds the buffer file.
pub const BUFFER_VAR: &str = "RPIPE_FILE";

/// Environment variable R reads its user profile path from.
pub const PROFILE_VAR: &str = "R_PROFILE_USER";

/// Loads the buffer file into `df` and defines the `csv`/`tsv` writers.
pub const BOOTSTRAP: &str = include_str!("../resources/bootstrap.R");

/// An assembled startup profile on disk. Removed when dropped.
pub struct Profile {
    path: TempPath,
}

impl Profile {
    /// Read the fragment at `fragment_path` and write bootstrap + fragment to
    /// a new temporary file.
    ///
    /// # Errors
    ///
    /// Fails if the fragment cannot be read. Nothing is written in that case.
    pub fn assemble(fragment_path: &Path) -> Result<Self> {
        let fragment = std::fs::read(fragment_path).with_context(|| {
            format!("Failed to read profile fragment: {}", fragment_path.display())
        })?;
        Self::from_parts(BOOTSTRAP, &fragment)
    }

    fn from_parts(bootstrap: &str, fragment: &[u8]) -> Result<Self> {
        let mut file = NamedTempFile::with_prefix("rpipe-profile-")
            .context("Failed to create profile file")?;
        file.write_all(bootstrap.as_bytes())?;
        if !bootstrap.ends_with('\n') {
            file.write_all(b"\n")?;
        }
        file.write_all(fragment)?;
        file.flush().context("Failed to write profile file")?;

        let path = file.into_temp_path();
        log::debug!("assembled profile at {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
