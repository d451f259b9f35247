#![deny(clippy::expect_used)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

use anyhow::Result;

pub mod confirm;
pub use confirm::{Answer, Confirmer, TerminalConfirmer};

pub mod diff;
pub use diff::{BuiltinDiff, DiffRenderer, GitDiff};

mod error;
pub use error::FileError;
#[doc(hidden)]
pub use error::warn as __warn;
pub use error::{ColorizedError, ColorizedResult};

pub mod opts;
use opts::{DiffTool, Rag, SearchTool, Transform};

mod scratch;

pub mod search;
use search::{BuiltinSearcher, ExternalSearcher, SearchProgram, TextSearcher};

mod session;
pub use session::{Outcome, ReplaceSession, Summary};

pub mod transform;
use transform::{RegexTransformer, SedTransformer, TextTransformer};

#[cfg(test)]
mod testing;

/// Runs one interactive session against the real terminal.
pub fn run(opts: &Rag) -> Result<Summary> {
    let external = |searcher: ExternalSearcher| Box::new(searcher.quiet(opts.quiet));
    let searcher: Box<dyn TextSearcher> = match opts.search_tool()? {
        SearchTool::Auto => external(ExternalSearcher::auto()),
        SearchTool::Ag => external(ExternalSearcher::only(SearchProgram::Ag)),
        SearchTool::Ack => external(ExternalSearcher::only(SearchProgram::Ack)),
        SearchTool::Grep => external(ExternalSearcher::only(SearchProgram::Grep)),
        SearchTool::Builtin => Box::new(BuiltinSearcher),
    };

    let transformer: Box<dyn TextTransformer> = match opts.transform()? {
        Transform::Sed => Box::new(SedTransformer),
        Transform::Builtin => Box::new(RegexTransformer),
    };

    let color = opts.color()?;
    let renderer: Box<dyn DiffRenderer> = match opts.diff()? {
        DiffTool::Git => Box::new(GitDiff::new(color)),
        DiffTool::Builtin => Box::new(BuiltinDiff::new(color)),
    };

    let mut confirmer = TerminalConfirmer::stdio();

    ReplaceSession::new(
        opts,
        searcher.as_ref(),
        transformer.as_ref(),
        renderer.as_ref(),
        &mut confirmer,
    )
    .run()
}
