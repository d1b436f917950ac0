//! Launching the R process.

use crate::profile::{BUFFER_VAR, PROFILE_VAR};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

/// The controlling terminal of the wrapper.
pub const TTY: &str = "/dev/tty";

/// Suppress R's banner and its save/restore prompts.
pub const R_FLAGS: &[&str] = &["--quiet", "--no-save", "--no-restore"];

pub const DEFAULT_INTERPRETER: &str = "R";

/// Where the child's stdout goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdoutTarget {
    /// The live session is shown on the terminal.
    Terminal,
    /// Output is discarded; results come back through the buffer file.
    Discard,
}

/// Everything needed to start one R session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Variables set on the child only; the wrapper's environment is untouched.
    pub env: Vec<(String, PathBuf)>,
    pub stdout: StdoutTarget,
}

impl SessionSpec {
    /// Build the spec for a session over `buffer` with startup `profile`.
    ///
    /// With a `statement` the session runs it and its stdout is discarded;
    /// without one the session is interactive.
    pub fn new(
        program: impl Into<String>,
        statement: Option<String>,
        buffer: &Path,
        profile: &Path,
    ) -> Self {
        let mut args: Vec<String> = R_FLAGS.iter().map(|s| s.to_string()).collect();
        let stdout = match statement {
            Some(statement) => {
                args.push("-e".to_string());
                args.push(statement);
                StdoutTarget::Discard
            }
            None => StdoutTarget::Terminal,
        };

        SessionSpec {
            program: program.into(),
            args,
            env: vec![
                (BUFFER_VAR.to_string(), buffer.to_path_buf()),
                (PROFILE_VAR.to_string(), profile.to_path_buf()),
            ],
            stdout,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.stdout == StdoutTarget::Terminal
    }
}

/// Runs a session to completion.
#[async_trait(?Send)]
pub trait Launcher {
    /// Start the session described by `spec` and wait for it to exit.
    async fn run(&self, spec: &SessionSpec) -> Result<ExitStatus>;
}

/// Launches the real interpreter as a child process.
pub struct Interpreter;

impl Interpreter {
    fn stdin(spec: &SessionSpec) -> Result<Stdio> {
        match File::open(TTY) {
            Ok(tty) => Ok(Stdio::from(tty)),
            // A one-shot statement does not need a terminal to read from.
            Err(err) if !spec.is_interactive() => {
                log::debug!("no controlling terminal ({err}); child stdin is null");
                Ok(Stdio::null())
            }
            Err(err) => Err(err).context("Failed to open the controlling terminal for input"),
        }
    }

    fn stdout(spec: &SessionSpec) -> Result<Stdio> {
        match spec.stdout {
            StdoutTarget::Discard => Ok(Stdio::null()),
            StdoutTarget::Terminal => {
                let tty = OpenOptions::new()
                    .write(true)
                    .open(TTY)
                    .context("Failed to open the controlling terminal for output")?;
                Ok(Stdio::from(tty))
            }
        }
    }
}

#[async_trait(?Send)]
impl Launcher for Interpreter {
    async fn run(&self, spec: &SessionSpec) -> Result<ExitStatus> {
        log::debug!("launching {} {:?}", spec.program, spec.args);

        let status = tokio::process::Command::new(&spec.program)
            .args(&spec.args)
            .envs(spec.env.iter().map(|(k, v)| (k, v)))
            .stdin(Self::stdin(spec)?)
            .stdout(Self::stdout(spec)?)
            .status()
            .await
            .with_context(|| format!("Failed to launch interpreter: {}", spec.program))?;

        if !status.success() {
            log::warn!("{} exited with {}", spec.program, status);
        }
        Ok(status)
    }
}
