use anyhow::{Result, anyhow};

macro_rules! declare_const {
    ($var: ident) => {
        pub const $var: &str = stringify!($var);
    };
}

declare_const!(NO_COLOR);
declare_const!(RAG_DIFF);
declare_const!(RAG_SEARCH_TOOL);
declare_const!(RAG_TRANSFORM);

/// A wrapper around `std::env::var` that treats an unset variable as `None` and converts other
/// errors into an `anyhow::Error`.
///
/// # Examples
///
/// ```
/// use rag_internal::env::var;
/// use std::env;
///
/// unsafe {
///     env::set_var("RAG_DOCTEST", "builtin");
/// }
/// assert_eq!(var("RAG_DOCTEST").unwrap().as_deref(), Some("builtin"));
///
/// unsafe {
///     env::remove_var("RAG_DOCTEST");
/// }
/// assert_eq!(var("RAG_DOCTEST").unwrap(), None);
/// ```
pub fn var(key: &str) -> Result<Option<String>> {
    match std::env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(anyhow!(format!("{err}: {key}"))),
    }
}

/// Returns true if the environment variable `key` is set to a non-empty value.
#[must_use]
pub fn is_set(key: &str) -> bool {
    std::env::var_os(key).is_some_and(|value| !value.is_empty())
}
