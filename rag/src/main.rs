use clap::{Parser, builder::PossibleValuesParser, crate_version};
use rag_session::opts::{ColorChoice, DiffTool, Rag as RagOpts, SearchTool, Transform};
use std::{ffi::OsString, path::PathBuf, process::ExitCode};

/// Exit status when the operator answers `q`.
const EXIT_CANCELLED: u8 = 2;

#[derive(Debug, Parser)]
#[clap(
    name = "rag",
    version = crate_version!(),
    about = "Find a pattern in a directory tree and interactively replace it, file by file",
    after_help = r#"Each matching file is shown as a diff of the proposed changes, followed by a prompt. Answer
`y` to write the changes, `q` to stop, or anything else to skip the file.

ENVIRONMENT VARIABLES:

RAG_SEARCH_TOOL, RAG_TRANSFORM, and RAG_DIFF provide defaults for `--search-tool`, `--transform`,
and `--diff`. Options given on the command line take precedence.

NO_COLOR disables color when `--color` is `auto`.

RUST_LOG controls diagnostic logging, e.g., `RUST_LOG=debug` shows each command that is run.
"#
)]
// Please keep the last three fields `query`, `replacement`, and `directory`, in that order. Please
// keep all other fields sorted.
struct Opts {
    #[clap(
        long,
        value_name = "WHEN",
        value_parser = PossibleValuesParser::new(ColorChoice::KEYWORDS.iter().copied()),
        help = "When to use color [default: auto]"
    )]
    color: Option<String>,

    #[clap(
        long,
        value_name = "RENDERER",
        value_parser = PossibleValuesParser::new(DiffTool::KEYWORDS.iter().copied()),
        help = "How to show proposed changes [default: git]"
    )]
    diff: Option<String>,

    #[clap(short, long, help = "Do not show warnings")]
    quiet: bool,

    #[clap(
        long,
        value_name = "TOOL",
        value_parser = PossibleValuesParser::new(SearchTool::KEYWORDS.iter().copied()),
        help = "Program that finds candidate files; `auto` tries ag, ack, then grep [default: auto]"
    )]
    search_tool: Option<String>,

    #[clap(
        long,
        value_name = "ENGINE",
        value_parser = PossibleValuesParser::new(Transform::KEYWORDS.iter().copied()),
        help = "How substitutions are applied [default: sed]"
    )]
    transform: Option<String>,

    #[clap(help = "Regular expression to search for")]
    query: String,

    #[clap(help = "Replacement for each match (may be empty)")]
    replacement: String,

    #[clap(help = "Directory to search [default: .]")]
    directory: Option<PathBuf>,
}

impl From<Opts> for RagOpts {
    fn from(opts: Opts) -> Self {
        let Opts {
            color,
            diff,
            quiet,
            search_tool,
            transform,
            query,
            replacement,
            directory,
        } = opts;
        Self {
            color,
            diff,
            quiet,
            search_tool,
            transform,
            query,
            replacement,
            directory,
        }
    }
}

fn main() -> rag_session::ColorizedResult<ExitCode> {
    env_logger::try_init().unwrap_or_else(|error| {
        rag_session::__warn(
            &RagOpts::default(),
            &format!("`env_logger` already initialized: {error}"),
        );
    });

    rag(std::env::args_os())
}

fn rag<I, T>(args: I) -> rag_session::ColorizedResult<ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    // clap exits with status 2 on usage errors, which would be indistinguishable from `q`.
    let opts = match Opts::try_parse_from(args) {
        Ok(opts) => opts,
        Err(error) => {
            error
                .print()
                .map_err(|error| rag_session::ColorizedError::new(error.into()))?;
            return Ok(if error.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            });
        }
    };

    let summary =
        rag_session::run(&RagOpts::from(opts)).map_err(rag_session::ColorizedError::new)?;

    Ok(if summary.cancelled {
        ExitCode::from(EXIT_CANCELLED)
    } else {
        ExitCode::SUCCESS
    })
}
