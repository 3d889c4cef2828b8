//! Reading cursor and movement across verses, chapters and books.
//!
//! The navigator keeps the current chapter's verse list in both languages.
//! The primary list drives the cursor; the secondary list is aligned to it
//! purely by position, so a shorter secondary chapter shows a placeholder
//! instead of failing. Every movement either succeeds and returns the new
//! [`Cursor`], or fails and leaves the cursor exactly where it was.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, trace};

use super::catalog::BookId;
use super::config::{BibleConfig, DEFAULT_PLACEHOLDER, DEFAULT_START_REFERENCE};
use super::format::reference;
use super::store::VerseStore;
use super::types::error::{BibleError, Result};
use super::types::models::{Boundary, Cursor, Language, Snapshot, Verse};

#[derive(Debug, Clone)]
struct Position {
    book: BookId,
    chapter: u32,
    index: usize,
    primary: Vec<Verse>,
    secondary: Vec<Verse>,
}

/// A chapter fetched in both languages; `primary` is never empty.
struct ChapterLists {
    primary: Vec<Verse>,
    secondary: Vec<Verse>,
}

#[derive(Debug)]
pub struct Navigator {
    store: Arc<VerseStore>,
    primary: Language,
    placeholder: String,
    start_reference: String,
    position: Option<Position>,
    /// Last chapter per (language, book), tagged with the store generation it was probed at.
    last_chapters: Mutex<HashMap<(Language, BookId), (u64, u32)>>,
}

impl Navigator {
    /// An unpositioned navigator showing Korean with English alongside.
    pub fn new(store: Arc<VerseStore>) -> Self {
        Self {
            store,
            primary: Language::Korean,
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            start_reference: DEFAULT_START_REFERENCE.to_owned(),
            position: None,
            last_chapters: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(store: Arc<VerseStore>, config: &BibleConfig) -> Self {
        Self::new(store)
            .with_primary_language(config.primary_language)
            .with_placeholder(config.placeholder.clone())
            .with_start_reference(config.start_reference.clone())
    }

    pub fn with_primary_language(mut self, language: Language) -> Self {
        self.primary = language;
        self.position = None;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_start_reference(mut self, reference: impl Into<String>) -> Self {
        self.start_reference = reference.into();
        self
    }

    pub fn store(&self) -> &Arc<VerseStore> {
        &self.store
    }

    pub fn primary_language(&self) -> Language {
        self.primary
    }

    pub fn secondary_language(&self) -> Language {
        self.primary.other()
    }

    pub fn is_positioned(&self) -> bool {
        self.position.is_some()
    }

    // ------------------- STATE VIEWS -------------------

    /// Current position, `None` before the first successful load.
    pub fn cursor(&self) -> Option<Cursor> {
        self.position.as_ref().map(|position| self.cursor_of(position))
    }

    /// Everything the presentation layer needs to draw the current verse.
    pub fn snapshot(&self) -> Option<Snapshot> {
        let position = self.position.as_ref()?;
        let current = &position.primary[position.index];
        let secondary_text = position
            .secondary
            .get(position.index)
            .map(|verse| verse.text.clone())
            .unwrap_or_else(|| self.placeholder.clone());
        Some(Snapshot {
            book: self.book_name(position.book),
            chapter: position.chapter,
            verse: current.verse,
            primary_text: current.text.clone(),
            secondary_text,
            available_books: self.available_books(),
        })
    }

    /// Book names in the primary language, in canonical order.
    pub fn available_books(&self) -> Vec<String> {
        self.store
            .catalogs()
            .get(self.primary)
            .names()
            .map(str::to_owned)
            .collect()
    }

    /// Verse numbers of the loaded chapter, in list order.
    pub fn verse_numbers(&self) -> Vec<u32> {
        self.position
            .as_ref()
            .map(|position| position.primary.iter().map(|verse| verse.verse).collect())
            .unwrap_or_default()
    }

    /// `1..=last chapter` of `book`, for chapter pickers.
    pub fn chapter_numbers(&self, book: &str) -> Result<Vec<u32>> {
        Ok((1..=self.find_last_chapter(book)?).collect())
    }

    // ------------------- MOVEMENT -------------------

    /// Positions at the configured start reference.
    pub fn start(&mut self) -> Result<Cursor> {
        let reference = self.start_reference.clone();
        self.jump_to(&reference)
    }

    /// Loads `book` `chapter` and moves to its first verse.
    ///
    /// `book` may be named in either language.
    pub fn load_chapter(&mut self, book: &str, chapter: u32) -> Result<Cursor> {
        let result = self.resolve(book).and_then(|id| {
            let lists = self
                .fetch(id, chapter)
                .ok_or_else(|| self.chapter_not_found(id, chapter))?;
            Ok(self.adopt(id, chapter, lists, 0))
        });
        logged("load_chapter", result)
    }

    /// Moves to the verse numbered `verse` in the loaded chapter.
    pub fn select_verse(&mut self, verse: u32) -> Result<Cursor> {
        let result = match self.position.as_ref() {
            None => Err(BibleError::Unpositioned),
            Some(position) => match index_of_verse(&position.primary, verse) {
                Some(index) => {
                    self.set_index(index);
                    self.current()
                }
                None => Err(BibleError::VerseNotFound {
                    book: self.book_name(position.book),
                    chapter: position.chapter,
                    verse,
                }),
            },
        };
        logged("select_verse", result)
    }

    /// Moves one verse forward, rolling over into the next chapter or book.
    pub fn next(&mut self) -> Result<Cursor> {
        let result = self.step_forward();
        logged("next", result)
    }

    /// Moves one verse back, rolling over to the end of the previous chapter or book.
    pub fn previous(&mut self) -> Result<Cursor> {
        let result = self.step_backward();
        logged("previous", result)
    }

    /// Parses `<book> <chapter>:<verse>` and moves there.
    ///
    /// The book may be named in either language; English matches ignore case.
    pub fn jump_to(&mut self, input: &str) -> Result<Cursor> {
        let result = reference::parse(input).and_then(|target| {
            let id = self.resolve(&target.book)?;
            let lists = self
                .fetch(id, target.chapter)
                .ok_or_else(|| self.chapter_not_found(id, target.chapter))?;
            let index = index_of_verse(&lists.primary, target.verse).ok_or_else(|| {
                BibleError::VerseNotFound {
                    book: self.book_name(id),
                    chapter: target.chapter,
                    verse: target.verse,
                }
            })?;
            Ok(self.adopt(id, target.chapter, lists, index))
        });
        logged("jump_to", result)
    }

    /// Re-reads the current chapter from the store, keeping the verse number
    /// when it still exists and falling back to the first verse otherwise.
    pub fn refresh(&mut self) -> Result<Cursor> {
        let result = match self.position.as_ref() {
            None => Err(BibleError::Unpositioned),
            Some(position) => {
                let (book, chapter) = (position.book, position.chapter);
                let verse = position.primary[position.index].verse;
                match self.fetch(book, chapter) {
                    Some(lists) => {
                        let index = index_of_verse(&lists.primary, verse).unwrap_or(0);
                        Ok(self.adopt(book, chapter, lists, index))
                    }
                    None => Err(self.chapter_not_found(book, chapter)),
                }
            }
        };
        logged("refresh", result)
    }

    fn step_forward(&mut self) -> Result<Cursor> {
        let position = self.position.as_ref().ok_or(BibleError::Unpositioned)?;
        let (book, chapter, index) = (position.book, position.chapter, position.index);

        if index + 1 < position.primary.len() {
            self.set_index(index + 1);
            return self.current();
        }

        let following = chapter
            .checked_add(1)
            .and_then(|next| self.fetch(book, next).map(|lists| (next, lists)));
        if let Some((next, lists)) = following {
            return Ok(self.adopt(book, next, lists, 0));
        }

        if let Some(next_book) = book.next() {
            if let Some(lists) = self.fetch(next_book, 1) {
                return Ok(self.adopt(next_book, 1, lists, 0));
            }
        }

        Err(BibleError::CorpusBoundary(Boundary::End))
    }

    fn step_backward(&mut self) -> Result<Cursor> {
        let position = self.position.as_ref().ok_or(BibleError::Unpositioned)?;
        let (book, chapter, index) = (position.book, position.chapter, position.index);

        if index > 0 {
            self.set_index(index - 1);
            return self.current();
        }

        if chapter > 1 {
            if let Some(lists) = self.fetch(book, chapter - 1) {
                let last = lists.primary.len() - 1;
                return Ok(self.adopt(book, chapter - 1, lists, last));
            }
        }

        if let Some(previous_book) = book.previous() {
            let last_chapter = self.last_chapter(previous_book);
            if last_chapter > 0 {
                if let Some(lists) = self.fetch(previous_book, last_chapter) {
                    let last = lists.primary.len() - 1;
                    return Ok(self.adopt(previous_book, last_chapter, lists, last));
                }
            }
        }

        Err(BibleError::CorpusBoundary(Boundary::Start))
    }

    // ------------------- DISCOVERY -------------------

    /// Highest chapter of `book`, found by probing chapters 1, 2, ... until
    /// one is empty.
    ///
    /// Results are cached per primary language and book, and invalidated
    /// whenever the store's generation changes, so a reload is always seen.
    pub fn find_last_chapter(&self, book: &str) -> Result<u32> {
        let id = self.resolve(book)?;
        match self.last_chapter(id) {
            0 => Err(self.chapter_not_found(id, 1)),
            last => Ok(last),
        }
    }

    /// Highest verse number present in `book` `chapter`. This is the maximum
    /// number, not the entry count.
    pub fn find_last_verse(&self, book: &str, chapter: u32) -> Result<u32> {
        let id = self.resolve(book)?;
        self.store
            .verses_for(id, chapter, self.primary)
            .iter()
            .map(|verse| verse.verse)
            .max()
            .ok_or_else(|| self.chapter_not_found(id, chapter))
    }

    fn last_chapter(&self, book: BookId) -> u32 {
        let generation = self.store.generation();
        let key = (self.primary, book);
        if let Some(&(cached_generation, last)) = self.chapter_cache().get(&key) {
            if cached_generation == generation {
                return last;
            }
        }

        let mut last = 0u32;
        while let Some(next) = last.checked_add(1) {
            if !self.store.has_chapter(book, next, self.primary) {
                break;
            }
            last = next;
        }
        trace!(
            "Probed book {} in {}: last chapter {} (generation {})",
            book.code(),
            self.primary,
            last,
            generation
        );
        self.chapter_cache().insert(key, (generation, last));
        last
    }

    fn chapter_cache(&self) -> MutexGuard<'_, HashMap<(Language, BookId), (u64, u32)>> {
        self.last_chapters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // ------------------- HELPERS -------------------

    fn resolve(&self, book: &str) -> Result<BookId> {
        self.store
            .catalogs()
            .resolve(book)
            .ok_or_else(|| BibleError::BookNotFound(book.trim().to_owned()))
    }

    /// Both language lists for a chapter, or `None` when the primary one is empty.
    fn fetch(&self, book: BookId, chapter: u32) -> Option<ChapterLists> {
        let primary = self.store.verses_for(book, chapter, self.primary);
        if primary.is_empty() {
            return None;
        }
        let secondary = self.store.verses_for(book, chapter, self.secondary_language());
        if secondary.len() != primary.len() {
            debug!(
                "Chapter {} {} has {} {} verses but {} {} verses; aligning by position",
                book.code(),
                chapter,
                primary.len(),
                self.primary,
                secondary.len(),
                self.secondary_language()
            );
        }
        Some(ChapterLists { primary, secondary })
    }

    fn adopt(&mut self, book: BookId, chapter: u32, lists: ChapterLists, index: usize) -> Cursor {
        let position = Position {
            book,
            chapter,
            index,
            primary: lists.primary,
            secondary: lists.secondary,
        };
        let cursor = self.cursor_of(&position);
        self.position = Some(position);
        cursor
    }

    fn set_index(&mut self, index: usize) {
        if let Some(position) = self.position.as_mut() {
            position.index = index;
        }
    }

    fn current(&self) -> Result<Cursor> {
        self.cursor().ok_or(BibleError::Unpositioned)
    }

    fn cursor_of(&self, position: &Position) -> Cursor {
        Cursor {
            book: self.book_name(position.book),
            chapter: position.chapter,
            verse: position.primary[position.index].verse,
            index: position.index,
        }
    }

    fn book_name(&self, book: BookId) -> String {
        self.store.catalogs().name(book, self.primary).to_owned()
    }

    fn chapter_not_found(&self, book: BookId, chapter: u32) -> BibleError {
        BibleError::ChapterNotFound {
            book: self.book_name(book),
            chapter,
        }
    }
}

fn index_of_verse(verses: &[Verse], verse: u32) -> Option<usize> {
    verses.iter().position(|candidate| candidate.verse == verse)
}

fn logged(operation: &str, result: Result<Cursor>) -> Result<Cursor> {
    match &result {
        Ok(cursor) => trace!(
            "{}: now at {} {}:{} (index {})",
            operation,
            cursor.book,
            cursor.chapter,
            cursor.verse,
            cursor.index
        ),
        Err(e) => debug!("{}: {}", operation, e),
    }
    result
}
