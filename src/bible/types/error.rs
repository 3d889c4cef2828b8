//! Custom error types for the bible-reader crate.

use thiserror::Error;

use super::models::{Boundary, SkipReason};

/// The primary error type for all operations in this crate.
///
/// Every variant is recoverable: loads report them inside a
/// [`LoadReport`](super::models::LoadReport) and the navigator leaves its
/// cursor where it was when it returns one.
#[derive(Debug, Error)]
pub enum BibleError {
    /// A source line that could not become a verse record. Skipped and counted.
    #[error("Malformed line {line}: {reason}")]
    MalformedLine { line: usize, reason: SkipReason },

    /// A source could not be opened or read; the collection stays empty.
    #[error("Source unavailable: {path}: {source}")]
    SourceUnavailable {
        path: String,
        source: std::io::Error,
    },

    /// No verses exist for the requested book and chapter.
    #[error("Chapter not found: {book} {chapter}")]
    ChapterNotFound { book: String, chapter: u32 },

    /// The loaded chapter has no verse with the requested number.
    #[error("Verse not found: {book} {chapter}:{verse}")]
    VerseNotFound { book: String, chapter: u32, verse: u32 },

    /// The book name matches neither catalog.
    #[error("Book not found: {0}")]
    BookNotFound(String),

    /// The reference text is not of the shape `<book> <chapter>:<verse>`.
    #[error("Invalid reference format: {0:?}")]
    ReferenceParse(String),

    /// Attempted to move before the first or past the last verse of the corpus.
    #[error("Reached the {0} of the corpus")]
    CorpusBoundary(Boundary),

    /// A movement was requested before any chapter was loaded.
    #[error("Navigator is not positioned; load a chapter first")]
    Unpositioned,

    /// The attached persistence collaborator failed.
    #[error("Persistence failed: {0}")]
    Persistence(String),

    /// The navigator worker thread is no longer accepting jobs.
    #[error("Navigator session has stopped")]
    NavigatorStopped,
}

/// A convenience `Result` type alias using the crate's `BibleError` type.
pub type Result<T> = std::result::Result<T, BibleError>;
