use crate::rule::RuleSelector;
use regex::Regex;
use std::sync::OnceLock;

/// Four-digit years from 1900 to 2099, ASCII digits only
const YEAR_PATTERN: &str = r"19[0-9]{2}|20[0-9]{2}";

fn year_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(YEAR_PATTERN).unwrap())
}

/// Compute the part of `name` that `rule` acts on.
///
/// Offsets and counts are measured in characters. Out-of-range values are
/// clamped, so this never panics. `None` means the rule does not apply; an
/// empty slice is also possible (e.g. a zero count) and callers treat it the
/// same way.
pub fn extract<'a>(name: &'a str, rule: &RuleSelector) -> Option<&'a str> {
    match rule {
        RuleSelector::YearPrefix => year_regex().find(name).map(|m| m.as_str()),
        RuleSelector::PrefixChars { count } => Some(prefix_chars(name, clamp_count(*count))),
        RuleSelector::SuffixCharsNoExt { count } => {
            Some(suffix_chars(stem(name), clamp_count(*count)))
        },
        RuleSelector::SliceAt { pos, count } => slice_at(name, *pos, clamp_count(*count)),
        RuleSelector::AfterMarker { marker } => after_marker(name, marker),
        RuleSelector::BeforeMarker { marker } => before_marker(name, marker),
        RuleSelector::AfterMarkerChars { marker, count } => {
            after_marker(name, marker).map(|rest| prefix_chars(rest, clamp_count(*count)))
        },
        RuleSelector::BeforeMarkerChars { marker, count } => {
            before_marker(name, marker).map(|head| suffix_chars(head, clamp_count(*count)))
        },
    }
}

/// Negative counts behave like zero
fn clamp_count(count: i64) -> usize {
    if count <= 0 {
        0
    } else {
        usize::try_from(count).unwrap_or(usize::MAX)
    }
}

/// Byte offset of the `n`th character, or the end of the string
fn byte_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(idx, _)| idx)
}

fn prefix_chars(s: &str, n: usize) -> &str {
    &s[..byte_offset(s, n)]
}

fn suffix_chars(s: &str, n: usize) -> &str {
    let skip = s.chars().count().saturating_sub(n);
    &s[byte_offset(s, skip)..]
}

/// The name without its last extension; a name with no dot is all stem
fn stem(name: &str) -> &str {
    name.rfind('.').map_or(name, |dot| &name[..dot])
}

fn slice_at(name: &str, pos: i64, n: usize) -> Option<&str> {
    let pos = usize::try_from(pos).ok()?;
    if pos > name.chars().count() {
        return None;
    }
    let start = byte_offset(name, pos);
    let end = byte_offset(name, pos.saturating_add(n));
    Some(&name[start..end])
}

fn after_marker<'a>(name: &'a str, marker: &str) -> Option<&'a str> {
    if marker.is_empty() {
        return None;
    }
    name.find(marker).map(|idx| &name[idx + marker.len()..])
}

fn before_marker<'a>(name: &'a str, marker: &str) -> Option<&'a str> {
    if marker.is_empty() {
        return None;
    }
    name.find(marker).map(|idx| &name[..idx])
}
