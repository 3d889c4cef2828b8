//! BTX line parsing.
//!
//! A BTX source holds one verse per line:
//!
//! ```text
//! 01001001 1:1 In the beginning God created the heavens and the earth.
//! ^^        ^ ^ ^-- verse text, may contain whitespace
//! |         | +---- verse
//! |         +------ chapter
//! +---------------- two-digit book code, followed by any other digits
//! ```
//!
//! Fields are separated by runs of whitespace. There is no header, trailer
//! or escaping.

use crate::bible::catalog::{BookCatalog, BookId};
use crate::bible::types::models::{SkipReason, Verse};

/// A successfully parsed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub book: BookId,
    pub verse: Verse,
}

/// Parses one line against `catalog`, naming the book in the catalog's language.
///
/// Returns the reason the line must be skipped when it is not a valid verse.
/// Checks run in field order: field count, then chapter/verse, then book code.
pub fn parse_line(line: &str, catalog: &BookCatalog) -> Result<ParsedLine, SkipReason> {
    let (key_field, rest) = split_field(line.trim_start()).ok_or(SkipReason::TooFewFields)?;
    let (reference_field, rest) = split_field(rest).ok_or(SkipReason::TooFewFields)?;
    let text = rest.trim();
    if text.is_empty() {
        return Err(SkipReason::TooFewFields);
    }

    let (chapter, verse) = parse_chapter_verse(reference_field).ok_or(SkipReason::BadChapterVerse)?;

    let book = key_field
        .get(..2)
        .and_then(BookId::from_code)
        .ok_or(SkipReason::UnknownBook)?;

    Ok(ParsedLine {
        book,
        verse: Verse {
            book: catalog.name(book).to_owned(),
            chapter,
            verse,
            text: text.to_owned(),
        },
    })
}

/// Splits off the leading non-whitespace run, returning it and the remainder.
fn split_field(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match input.find(char::is_whitespace) {
        Some(end) => Some((&input[..end], &input[end..])),
        None => Some((input, "")),
    }
}

/// Parses `<chapter>:<verse>`; both must be positive integers.
fn parse_chapter_verse(field: &str) -> Option<(u32, u32)> {
    let (chapter, verse) = field.split_once(':')?;
    let chapter: u32 = chapter.parse().ok()?;
    let verse: u32 = verse.parse().ok()?;
    if chapter == 0 || verse == 0 {
        return None;
    }
    Some((chapter, verse))
}
