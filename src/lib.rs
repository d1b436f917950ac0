//! # rpipe
//!
//! Run an R session in the middle of a shell pipeline.
//!
//! ```text
//! cat data.csv | rpipe 'subset(x > 1)' | sort
//! ```
//!
//! Stdin is captured to a temporary buffer file. R is started with a startup
//! profile that loads the buffer as a `data.table` named `df` and defines two
//! writers, `csv(x)` and `tsv(x)`, which overwrite the buffer with `x` and quit.
//! When R exits, whatever the buffer holds is written to stdout.
//!
//! With an expression, the session runs `df |> EXPR |> csv()` (or
//! `EXPR |> csv()` when stdin was empty) with its own stdout discarded. Without
//! one, the session is interactive on the controlling terminal.
//!
//! ## The profile
//!
//! The startup profile is the bootstrap in `resources/bootstrap.R` followed by
//! the user's fragment, read from `$XDG_CONFIG_HOME/rpipe/profile.R` (or
//! `~/.config/rpipe/profile.R`). The fragment must exist; an empty file is
//! fine.
//!
//! ## Embedding
//!
//! ```no_run
//! use rpipe::{Interpreter, Mode, Options, Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let options = Options::new(Mode::resolve(Some("head(5)".into())), "profile.R");
//!     let input = std::fs::File::open("data.csv")?;
//!     Pipeline::new(options)
//!         .run(&Interpreter, input, false, std::io::stdout())
//!         .await
//! }
//! ```
//!
//! Implement [`Launcher`] to run sessions some other way.

pub mod buffer;
pub mod config;
pub mod mode;
pub mod pipeline;
pub mod profile;
pub mod session;

pub use buffer::InputBuffer;
pub use mode::{Mode, OutputFormat};
pub use pipeline::{Options, Pipeline};
pub use profile::Profile;
pub use session::{Interpreter, Launcher, SessionSpec, StdoutTarget};
