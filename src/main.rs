use anyhow::Result;
use clap::Parser;
use rpipe::{Interpreter, Mode, Options, OutputFormat, Pipeline, config};
use std::io::{self, IsTerminal};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "rpipe",
    about = "Run an R session in the middle of a shell pipeline",
    long_about = "Reads stdin into a table `df`, starts R with it loaded, and writes the \
                  result to stdout.\n\nWithout EXPR the session is interactive; call csv(x) \
                  or tsv(x) to write x out and quit. With EXPR, `df |> EXPR |> csv()` is run \
                  and the session ends on its own.",
    version
)]
struct Args {
    /// Expression to apply to the input table (omit for an interactive session)
    expr: Option<String>,

    /// Write the result tab-separated instead of comma-separated
    #[arg(short, long)]
    tsv: bool,

    /// R executable to run
    #[arg(long, env = "RPIPE_R", default_value = rpipe::session::DEFAULT_INTERPRETER)]
    interpreter: String,

    /// Profile fragment appended to the bootstrap
    /// [default: $XDG_CONFIG_HOME/rpipe/profile.R]
    #[arg(long, env = "RPIPE_PROFILE")]
    profile: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let fragment = match args.profile {
        Some(path) => path,
        None => config::default_fragment_path()?,
    };

    let mut options = Options::new(Mode::resolve(args.expr), fragment);
    options.interpreter = args.interpreter;
    if args.tsv {
        options.format = OutputFormat::Tsv;
    }

    let stdin = io::stdin();
    let is_terminal = stdin.is_terminal();
    Pipeline::new(options)
        .run(&Interpreter, stdin, is_terminal, io::stdout())
        .await
}
