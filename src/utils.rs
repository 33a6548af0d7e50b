//! utilities used across delicious
use {
    chrono::{DateTime, SecondsFormat, Utc},
    serde::Deserialize,
    tracing::Level,
};

/// a field the service sends either as a list or as a space separated string
#[derive(Deserialize)]
#[serde(untagged)]
enum TagsRepr {
    /// `["a", "b"]`
    List(Vec<String>),
    /// `"a b"`
    Joined(String),
}

/// a field the service sends either as a bool or as `"yes"`/`"no"`
#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    /// `true`
    Bool(bool),
    /// `"no"`
    Str(String),
}

/// a field the service sends either as a number or as a numeric string
#[derive(Deserialize)]
#[serde(untagged)]
enum CountRepr {
    /// `12`
    Num(u64),
    /// `"12"`
    Str(String),
}

/// split a space separated tag string, dropping empty parts
pub fn split_tags(tags: &str) -> Vec<String> {
    tags.split_whitespace().map(str::to_string).collect()
}

/// parse the service's `"yes"`/`"no"` flags, anything but `no` counts as set
pub fn parse_flag(value: &str) -> bool {
    !value.trim().eq_ignore_ascii_case("no")
}

/// deserialize a tag list
///
/// accepts either a sequence of strings or a single space separated string
pub fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<TagsRepr>::deserialize(deserializer)? {
        Some(TagsRepr::List(tags)) => tags
            .into_iter()
            .flat_map(|tag| split_tags(&tag))
            .collect(),
        Some(TagsRepr::Joined(tags)) => split_tags(&tags),
        None => Vec::new(),
    })
}

/// deserialize an optional flag from a bool or a `"yes"`/`"no"` string
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<FlagRepr>::deserialize(deserializer)? {
        Some(FlagRepr::Bool(b)) => Some(b),
        Some(FlagRepr::Str(s)) => Some(parse_flag(&s)),
        None => None,
    })
}

/// deserialize an optional count from a number or a numeric string
///
/// empty strings are treated as missing
pub fn deserialize_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<CountRepr>::deserialize(deserializer)? {
        Some(CountRepr::Num(n)) => Ok(Some(n)),
        Some(CountRepr::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(CountRepr::Str(s)) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// parse a timestamp in the service's format (`2005-11-28T05:26:09Z`)
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// format a timestamp the way the service expects it
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// converts a string into a log level
///
/// unknown levels fall back to `ERROR`
pub fn string_to_log_level(lvl: &str) -> Level {
    match lvl.to_lowercase().as_str() {
        "d" | "debug" | "dbg" => Level::DEBUG,
        "t" | "trace" | "trc" => Level::TRACE,
        "e" | "error" | "err" => Level::ERROR,
        "i" | "info" | "inf" => Level::INFO,
        "w" | "warn" | "wrn" => Level::WARN,
        _ => Level::ERROR,
    }
}
