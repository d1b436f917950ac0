//! Runs one invocation: capture, profile, session, relay.

use crate::buffer::InputBuffer;
use crate::mode::{Mode, OutputFormat};
use crate::profile::Profile;
use crate::session::{DEFAULT_INTERPRETER, Launcher, SessionSpec};
use anyhow::Result;
use std::io::{Read, Write};
use std::path::PathBuf;

/// Settings for one invocation.
#[derive(Debug, Clone)]
pub struct Options {
    pub mode: Mode,
    pub format: OutputFormat,
    pub interpreter: String,
    pub fragment: PathBuf,
}

impl Options {
    pub fn new(mode: Mode, fragment: impl Into<PathBuf>) -> Self {
        Options {
            mode,
            format: OutputFormat::default(),
            interpreter: DEFAULT_INTERPRETER.to_string(),
            fragment: fragment.into(),
        }
    }
}

/// Capture stdin, run the session, relay the result.
pub struct Pipeline {
    options: Options,
}

impl Pipeline {
    pub fn new(options: Options) -> Self {
        Pipeline { options }
    }

    /// Run one invocation end to end.
    ///
    /// The child's exit status does not affect the result: whatever the
    /// buffer file holds once it exits is written to `output`. Both temporary
    /// files are removed before this returns, on every path.
    pub async fn run<L, R, W>(
        &self,
        launcher: &L,
        input: R,
        input_is_terminal: bool,
        output: W,
    ) -> Result<()>
    where
        L: Launcher + ?Sized,
        R: Read,
        W: Write,
    {
        let buffer = InputBuffer::capture(input, input_is_terminal)?;
        let profile = Profile::assemble(&self.options.fragment)?;

        let statement = self
            .options
            .mode
            .statement(!input_is_terminal, self.options.format);
        let spec = SessionSpec::new(
            self.options.interpreter.as_str(),
            statement,
            buffer.path(),
            profile.path(),
        );
        log::debug!(
            "mode: {:?}, empty input: {}",
            self.options.mode,
            buffer.is_empty()
        );

        launcher.run(&spec).await?;

        buffer.relay(output)?;
        Ok(())
    }
}
