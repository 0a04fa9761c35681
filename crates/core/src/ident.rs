//! Content identifier parsing.
//!
//! User-supplied identifiers arrive in three surface forms: a raw id
//! (`tt0111161`, `12345`), a catalog URL (`imdb.com/title/tt0111161`,
//! `kitsu.io/anime/12345`), or a Stremio composite stream id with
//! season/episode suffixes (`tt0111161:1:2`, `kitsu:12345:1:1`). All of
//! them normalize through [`parse_content_id`] into a single
//! [`ContentRef`]; suffixes after the leading id segment are discarded
//! because the catalog tracks title-level entries, not episodes.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static IMDB_EXACT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^tt\d+$").expect("valid regex"));

static IMDB_EMBEDDED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(tt\d+)").expect("valid regex"));

static KITSU_PREFIXED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^kitsu:?(\d+)").expect("valid regex"));

static KITSU_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"kitsu\.io/anime/(\d+)").expect("valid regex"));

static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").expect("valid regex"));

/// A parsed, normalized content reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum ContentRef {
    /// An IMDB title id (`tt` + digits).
    Imdb(String),
    /// A numeric Kitsu anime id; must be resolved to an IMDB id before
    /// it can be stored.
    Kitsu(String),
}

impl ContentRef {
    /// The bare identifier string, without any type tag.
    pub fn id(&self) -> &str {
        match self {
            ContentRef::Imdb(id) | ContentRef::Kitsu(id) => id,
        }
    }
}

/// Classify a raw identifier string into a [`ContentRef`].
///
/// Rules are applied in order; the first match wins:
///
/// 1. Exact `tt<digits>`: IMDB id as-is.
/// 2. An embedded `tt<digits>` token, covering IMDB URLs and composite
///    stream ids like `tt0111161:1:2`.
/// 3. `kitsu:<digits>[...]` or `kitsu<digits>` composite forms.
/// 4. A `kitsu.io/anime/<digits>` URL, or a purely numeric string.
///
/// Returns `None` for anything else; the caller rejects the input as an
/// invalid format.
pub fn parse_content_id(raw: &str) -> Option<ContentRef> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if IMDB_EXACT_RE.is_match(trimmed) {
        return Some(ContentRef::Imdb(trimmed.to_string()));
    }

    if let Some(caps) = IMDB_EMBEDDED_RE.captures(trimmed) {
        return Some(ContentRef::Imdb(caps[1].to_string()));
    }

    if let Some(caps) = KITSU_PREFIXED_RE.captures(trimmed) {
        return Some(ContentRef::Kitsu(caps[1].to_string()));
    }

    if let Some(caps) = KITSU_URL_RE.captures(trimmed) {
        return Some(ContentRef::Kitsu(caps[1].to_string()));
    }

    if DIGITS_RE.is_match(trimmed) {
        return Some(ContentRef::Kitsu(trimmed.to_string()));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_imdb_id_parses_verbatim() {
        assert_eq!(
            parse_content_id("tt0111161"),
            Some(ContentRef::Imdb("tt0111161".into()))
        );
        assert_eq!(
            parse_content_id("  tt42  "),
            Some(ContentRef::Imdb("tt42".into()))
        );
    }

    #[test]
    fn imdb_url_yields_embedded_token() {
        assert_eq!(
            parse_content_id("https://www.imdb.com/title/tt0111161/"),
            Some(ContentRef::Imdb("tt0111161".into()))
        );
        assert_eq!(
            parse_content_id("imdb.com/title/tt123"),
            Some(ContentRef::Imdb("tt123".into()))
        );
    }

    #[test]
    fn composite_stream_ids_discard_season_episode() {
        assert_eq!(
            parse_content_id("tt0111161:1:2"),
            Some(ContentRef::Imdb("tt0111161".into()))
        );
        assert_eq!(
            parse_content_id("kitsu:12345:1:1"),
            Some(ContentRef::Kitsu("12345".into()))
        );
    }

    #[test]
    fn kitsu_prefix_forms() {
        assert_eq!(
            parse_content_id("kitsu:12345"),
            Some(ContentRef::Kitsu("12345".into()))
        );
        assert_eq!(
            parse_content_id("kitsu12345"),
            Some(ContentRef::Kitsu("12345".into()))
        );
    }

    #[test]
    fn all_digits_is_kitsu() {
        assert_eq!(
            parse_content_id("12345"),
            Some(ContentRef::Kitsu("12345".into()))
        );
    }

    #[test]
    fn kitsu_url_yields_numeric_id() {
        assert_eq!(
            parse_content_id("https://kitsu.io/anime/1555"),
            Some(ContentRef::Kitsu("1555".into()))
        );
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        assert_eq!(parse_content_id(""), None);
        assert_eq!(parse_content_id("   "), None);
        assert_eq!(parse_content_id("tt"), None);
        assert_eq!(parse_content_id("not-an-id"), None);
        assert_eq!(parse_content_id("kitsu:"), None);
    }
}
