//! The buffer file: piped stdin goes in before R starts, results come out
//! after it exits.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use tempfile::{NamedTempFile, TempPath};

/// Temporary file carrying data into and out of the R session.
///
/// The handle is closed once the captured bytes are written; only the path is
/// kept so the child can rewrite the file freely. The file is removed when the
/// buffer is dropped.
pub struct InputBuffer {
    path: TempPath,
    len: u64,
}

impl InputBuffer {
    /// Capture `reader` to a fresh temporary file.
    ///
    /// When `is_terminal` is set the reader is not touched and the buffer is
    /// left empty, so an interactive stdin never blocks the wrapper. Otherwise
    /// the reader is drained to end-of-stream before returning.
    pub fn capture<R: Read>(mut reader: R, is_terminal: bool) -> Result<Self> {
        let mut file = NamedTempFile::with_prefix("rpipe-input-")
            .context("Failed to create input buffer file")?;

        let len = if is_terminal {
            0
        } else {
            io::copy(&mut reader, file.as_file_mut()).context("Failed to read stdin")?
        };
        file.as_file_mut()
            .flush()
            .context("Failed to flush input buffer file")?;

        let path = file.into_temp_path();
        log::debug!("captured {} bytes into {}", len, path.display());
        Ok(Self { path, len })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether stdin carried no data at capture time.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Copy the current contents of the buffer file to `writer`.
    pub fn relay<W: Write>(&self, mut writer: W) -> Result<u64> {
        let mut file = File::open(&self.path)
            .with_context(|| format!("Failed to reopen buffer file: {}", self.path.display()))?;
        let n = io::copy(&mut file, &mut writer).context("Failed to write output")?;
        writer.flush().context("Failed to write output")?;
        Ok(n)
    }
}
