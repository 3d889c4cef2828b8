//! # bible-reader
//!
//! Loads bilingual (Korean / English) Bible text in the line-oriented BTX
//! format and navigates it verse by verse across chapter and book
//! boundaries.
//!
//! Rendering, input handling and on-device storage are left to the caller;
//! they consume the [`Snapshot`] and drive the [`Navigator`].
pub mod bible;

// Re-export the main types for convenience
pub use bible::{
    BibleConfig,
    BibleError,
    BookId,
    Catalogs,
    Navigator,
    NavigatorHandle,
    Result,
    SourceSpec,
    VersePersistence,
    VerseStore,
    types::models::{
        Boundary,
        Cursor,
        Language,
        LoadReport,
        LoadStatus,
        SkipCounts,
        SkipReason,
        Snapshot,
        Verse,
    },
};
