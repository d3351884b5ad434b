//! Verse splitting and pagination
//!
//! Lyrics are stored as one text blob; a verse is a run of text between
//! blank lines. Verse order is the order of appearance in the text.

/// Separator between verses (one blank line)
pub const VERSE_SEPARATOR: &str = "\n\n";

/// Verses per page when the caller does not say
pub const DEFAULT_VERSE_LIMIT: usize = 1;

/// Split lyrics into verses
///
/// No trimming or deduplication: runs of blank lines produce empty verses and
/// an empty text is a single empty verse.
///
/// # Examples
/// ```
/// use songlib_common::verses::split_verses;
///
/// assert_eq!(split_verses("a\n\nb"), vec!["a", "b"]);
/// assert_eq!(split_verses("a\n\n\n\nb"), vec!["a", "", "b"]);
/// assert_eq!(split_verses(""), vec![""]);
/// ```
pub fn split_verses(text: &str) -> Vec<&str> {
    text.split(VERSE_SEPARATOR).collect()
}

/// Return verses `[offset, min(offset + limit, total))`
///
/// An offset at or past the last verse yields an empty page, never an error.
///
/// # Examples
/// ```
/// use songlib_common::verses::paginate_verses;
///
/// let text = "Verse one\n\nVerse two\n\nVerse three";
/// assert_eq!(paginate_verses(text, 1, 1), vec!["Verse two"]);
/// assert_eq!(paginate_verses(text, 5, 1), vec!["Verse two", "Verse three"]);
/// assert!(paginate_verses(text, 1, 3).is_empty());
/// ```
pub fn paginate_verses(text: &str, limit: usize, offset: usize) -> Vec<String> {
    let verses = split_verses(text);
    let total = verses.len();
    if offset >= total {
        return Vec::new();
    }
    let end = offset.saturating_add(limit).min(total);

    verses[offset..end].iter().map(|v| v.to_string()).collect()
}
