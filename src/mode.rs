//! Interactive vs. expression mode, and the one-line statement run in
//! expression mode.

/// Session variable holding the table loaded from the buffer file.
pub const INPUT_SYMBOL: &str = "df";

/// Which helper from the bootstrap writes the result back to the buffer file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
}

impl OutputFormat {
    /// Name of the bootstrap helper that serializes in this format.
    pub fn writer(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
        }
    }
}

/// How the R session is run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// The user drives the session from the terminal.
    Interactive,
    /// A single synthesized statement runs and the session quits.
    Expression(String),
}

impl Mode {
    pub fn resolve(expr: Option<String>) -> Self {
        match expr {
            Some(expr) => Self::Expression(expr),
            None => Self::Interactive,
        }
    }

    /// Build the statement passed to R with `-e`.
    ///
    /// The user expression is chained with the native pipe, after the loaded
    /// table when stdin was piped (even if the pipe was empty), and always
    /// into the writer helper.
    /// The expression is not validated; syntax errors are R's to report.
    pub fn statement(&self, piped: bool, format: OutputFormat) -> Option<String> {
        let Self::Expression(expr) = self else {
            return None;
        };
        let writer = format.writer();
        Some(if piped {
            format!("{INPUT_SYMBOL} |> {expr} |> {writer}()")
        } else {
            format!("{expr} |> {writer}()")
        })
    }
}
