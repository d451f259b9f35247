use anyhow::{Context, Result};
use regex::Regex;
use std::borrow::Cow;

/// Replaces every non-overlapping match of `re` in `text`, left to right.
///
/// `replacement` may refer to capture groups as `$1` or `${name}`. Use `$$` for a literal `$`.
pub fn replace_all<'t>(text: &'t str, re: &str, replacement: &str) -> Result<Cow<'t, str>> {
    let re = Regex::new(re).with_context(|| format!("Invalid pattern `{re}`"))?;
    Ok(re.replace_all(text, replacement))
}
