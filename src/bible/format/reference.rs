//! Free-text verse references such as `Genesis 1:1` or `요한1서 4:8`.

use std::sync::OnceLock;

use regex::Regex;

use crate::bible::types::error::{BibleError, Result};

/// Compiled reference pattern: book name (letters, digits, inner spaces),
/// whitespace, then `<chapter>:<verse>`.
static REFERENCE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn reference_regex() -> &'static Regex {
    REFERENCE_PATTERN.get_or_init(|| {
        Regex::new(r"^([\p{L}\d\s]+?)\s+(\d+):(\d+)$").expect("Invalid reference regex pattern")
    })
}

/// A parsed but not yet resolved reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
}

/// Parses `<bookName> <chapter>:<verse>`. Surrounding whitespace is ignored.
///
/// Returns [`BibleError::ReferenceParse`] when the shape does not match or a
/// number does not fit.
pub fn parse(input: &str) -> Result<Reference> {
    let trimmed = input.trim();
    let caps = reference_regex()
        .captures(trimmed)
        .ok_or_else(|| BibleError::ReferenceParse(input.to_owned()))?;

    let book = caps[1].trim();
    let chapter = caps[2].parse::<u32>();
    let verse = caps[3].parse::<u32>();
    match (book.is_empty(), chapter, verse) {
        (false, Ok(chapter), Ok(verse)) => Ok(Reference {
            book: book.to_owned(),
            chapter,
            verse,
        }),
        _ => Err(BibleError::ReferenceParse(input.to_owned())),
    }
}
