//! Positional placeholder scanning (`{{1}}`, `{{2}}`, ...)

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\d+)\}\}").expect("placeholder pattern is valid"));

/// Placeholder numbers as written, in order of appearance, repeats included
pub fn occurrences(text: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(text)
        .filter_map(|caps| Some(caps.get(1)?.as_str()))
        .collect()
}

/// Number of distinct placeholder numbers across all `texts`
pub fn distinct_count<'a>(texts: impl IntoIterator<Item = &'a str>) -> usize {
    texts
        .into_iter()
        .flat_map(occurrences)
        .collect::<BTreeSet<_>>()
        .len()
}
