//! Data structures shared by the store, the navigator and their callers

use std::fmt;

use super::error::BibleError;

/// The two languages present in the verse data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Korean,
    English,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Korean, Language::English];

    /// The language that is not `self`.
    pub fn other(self) -> Self {
        match self {
            Language::Korean => Language::English,
            Language::English => Language::Korean,
        }
    }

    /// Slot used by per-language tables.
    pub(crate) fn slot(self) -> usize {
        match self {
            Language::Korean => 0,
            Language::English => 1,
        }
    }

    /// Parses `ko`/`korean`/`kr` or `en`/`english`, case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "ko" | "kr" | "korean" => Some(Language::Korean),
            "en" | "english" => Some(Language::English),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Language::Korean => write!(f, "korean"),
            Language::English => write!(f, "english"),
        }
    }
}

/// One verse of one language's collection.
///
/// `book` is the catalog name of the book in the collection's own language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verse {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

/// Why a source line did not become a verse record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than three whitespace-separated fields, or an empty text field.
    TooFewFields,
    /// The second field is not `<chapter>:<verse>` with positive integers.
    BadChapterVerse,
    /// The two-digit book code is not in the catalog.
    UnknownBook,
    /// A record for the same (book, chapter, verse) was already loaded.
    Duplicate,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SkipReason::TooFewFields => write!(f, "fewer than three fields"),
            SkipReason::BadChapterVerse => write!(f, "invalid chapter:verse"),
            SkipReason::UnknownBook => write!(f, "unknown book code"),
            SkipReason::Duplicate => write!(f, "duplicate verse"),
        }
    }
}

/// Skipped-line counters for one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipCounts {
    pub too_few_fields: usize,
    pub bad_chapter_verse: usize,
    pub unknown_book: usize,
    pub duplicate: usize,
}

impl SkipCounts {
    pub fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::TooFewFields => self.too_few_fields += 1,
            SkipReason::BadChapterVerse => self.bad_chapter_verse += 1,
            SkipReason::UnknownBook => self.unknown_book += 1,
            SkipReason::Duplicate => self.duplicate += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.too_few_fields + self.bad_chapter_verse + self.unknown_book + self.duplicate
    }
}

/// How a load call ended.
#[derive(Debug)]
pub enum LoadStatus {
    /// The collection was (re)populated from the source.
    Loaded,
    /// The collection was already populated; nothing was read.
    AlreadyLoaded,
    /// Another load of the same language is running; nothing was done.
    InProgress,
    /// The source could not be read; the collection is empty.
    Unavailable(BibleError),
}

/// Outcome of one load call for one language.
#[derive(Debug)]
pub struct LoadReport {
    pub language: Language,
    pub status: LoadStatus,
    /// Records added by this call.
    pub loaded: usize,
    pub skipped: SkipCounts,
}

impl LoadReport {
    pub(crate) fn new(language: Language, status: LoadStatus) -> Self {
        Self {
            language,
            status,
            loaded: 0,
            skipped: SkipCounts::default(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.status, LoadStatus::Loaded)
    }
}

/// Which end of the corpus a movement ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Start,
    End,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Boundary::Start => write!(f, "start"),
            Boundary::End => write!(f, "end"),
        }
    }
}

/// The navigator's reading position.
///
/// `book` is in the primary (display) language and `index` is the position
/// of the current verse inside the loaded primary-language chapter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub index: usize,
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub primary_text: String,
    pub secondary_text: String,
    pub available_books: Vec<String>,
}
