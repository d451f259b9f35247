use anyhow::{Context, Result, anyhow};
use rag_internal::env;
use std::{io::IsTerminal, path::PathBuf, str::FromStr};

#[derive(Clone, Debug, Default)]
// Please keep the fields `query`, `replacement`, and `directory` last, in that order. Please keep
// all other fields sorted.
pub struct Rag {
    pub color: Option<String>,

    pub diff: Option<String>,

    pub quiet: bool,

    pub search_tool: Option<String>,

    pub transform: Option<String>,

    pub query: String,

    pub replacement: String,

    pub directory: Option<PathBuf>,
}

impl Rag {
    #[must_use]
    pub fn root(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn search_tool(&self) -> Result<SearchTool> {
        setting(
            self.search_tool.as_deref(),
            "--search-tool",
            env::RAG_SEARCH_TOOL,
            SearchTool::Auto,
        )
    }

    pub fn transform(&self) -> Result<Transform> {
        setting(
            self.transform.as_deref(),
            "--transform",
            env::RAG_TRANSFORM,
            Transform::Sed,
        )
    }

    pub fn diff(&self) -> Result<DiffTool> {
        setting(self.diff.as_deref(), "--diff", env::RAG_DIFF, DiffTool::Git)
    }

    /// Whether diffs and labels should be colored. `auto` means "stdout is a terminal and
    /// `NO_COLOR` is unset".
    pub fn color(&self) -> Result<bool> {
        let choice = self
            .color
            .as_deref()
            .map_or(Ok(ColorChoice::Auto), str::parse)
            .context("Invalid value for `--color`")?;
        Ok(match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::stdout().is_terminal() && !env::is_set(env::NO_COLOR),
        })
    }
}

/// Resolves a setting from the command line, then the environment, then `default`.
fn setting<T>(cli: Option<&str>, flag: &str, key: &str, default: T) -> Result<T>
where
    T: FromStr<Err = anyhow::Error>,
{
    if let Some(value) = cli {
        return value
            .parse()
            .with_context(|| format!("Invalid value for `{flag}`"));
    }
    match env::var(key)? {
        Some(value) => value
            .parse()
            .with_context(|| format!("Invalid value for `{key}`")),
        None => Ok(default),
    }
}

macro_rules! keyword_enum {
    ($name:ident { $($variant:ident => $keyword:literal),* $(,)? }) => {
        #[derive(Clone, Copy, Debug, Eq, PartialEq)]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            pub const KEYWORDS: &'static [&'static str] = &[$($keyword),*];
        }

        impl FromStr for $name {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($keyword => Ok(Self::$variant),)*
                    _ => Err(anyhow!(
                        "`{s}` is not one of {}",
                        Self::KEYWORDS.join(", ")
                    )),
                }
            }
        }
    };
}

keyword_enum!(SearchTool {
    Auto => "auto",
    Ag => "ag",
    Ack => "ack",
    Grep => "grep",
    Builtin => "builtin",
});

keyword_enum!(Transform {
    Sed => "sed",
    Builtin => "builtin",
});

keyword_enum!(DiffTool {
    Git => "git",
    Builtin => "builtin",
});

keyword_enum!(ColorChoice {
    Auto => "auto",
    Always => "always",
    Never => "never",
});
