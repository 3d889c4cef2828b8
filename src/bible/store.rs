//! In-memory verse collections, one per language.
//!
//! A collection is filled once from a BTX source and is read-only afterwards.
//! Loads are idempotent per language unless forced, and a per-language flag
//! keeps two loads of the same language from running at once. Readers never
//! block on a load for long: parsing happens outside the lock and the parsed
//! collection is installed in one write, so a reader sees either the old
//! contents or the new ones. "Not loaded yet" and "no such chapter" both read
//! as an empty result.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use encoding_rs::Encoding;
use log::{debug, info, trace, warn};

use super::catalog::{BookId, Catalogs};
use super::config::{BibleConfig, DEFAULT_SEARCH_LIMIT};
use super::format::btx;
use super::types::error::{BibleError, Result};
use super::types::models::{Language, LoadReport, LoadStatus, SkipCounts, SkipReason, Verse};
use super::utils::decode_source;

/// Optional storage collaborator.
///
/// The store works without one. When attached, every successful load is
/// written through to it; its failures are logged and never affect the
/// in-memory collections.
pub trait VersePersistence: Send + Sync {
    fn persist_verses(&self, language: Language, records: &[Verse]) -> Result<()>;

    fn query_verses(&self, book: &str, chapter: u32) -> Result<Vec<Verse>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadMode {
    IfEmpty,
    Force,
}

/// Verses in file order plus a (book, chapter) -> positions index.
#[derive(Debug, Default)]
struct Collection {
    verses: Vec<Verse>,
    chapters: HashMap<(BookId, u32), Vec<usize>>,
}

#[derive(Debug, Default)]
struct Slot {
    collection: RwLock<Collection>,
    loading: AtomicBool,
}

/// Clears a slot's loading flag when the load ends, however it ends.
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct VerseStore {
    catalogs: Catalogs,
    slots: [Slot; 2],
    generation: AtomicU64,
    search_limit: Option<usize>,
    persistence: Option<Box<dyn VersePersistence>>,
}

impl VerseStore {
    /// An empty store with the default search limit.
    pub fn new() -> Self {
        Self {
            catalogs: Catalogs::new(),
            slots: Default::default(),
            generation: AtomicU64::new(0),
            search_limit: Some(DEFAULT_SEARCH_LIMIT),
            persistence: None,
        }
    }

    /// An empty store using the config's search limit.
    pub fn from_config(config: &BibleConfig) -> Self {
        Self::new().with_search_limit(config.search_limit)
    }

    pub fn with_search_limit(mut self, limit: Option<usize>) -> Self {
        self.search_limit = limit;
        self
    }

    pub fn with_persistence(mut self, persistence: impl VersePersistence + 'static) -> Self {
        self.persistence = Some(Box::new(persistence));
        self
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    /// Bumped on every load, forced reload and clear that changes a collection.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    // ------------------- LOADING -------------------

    /// Populates `language` from BTX lines unless it already holds verses.
    pub fn load<I, S>(&self, lines: I, language: Language) -> LoadReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.begin_load(language, LoadMode::IfEmpty) {
            Ok(_guard) => self.populate(lines, language),
            Err(report) => report,
        }
    }

    /// Clears `language`, then populates it from BTX lines.
    pub fn force_reload<I, S>(&self, lines: I, language: Language) -> LoadReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.begin_load(language, LoadMode::Force) {
            Ok(_guard) => self.populate(lines, language),
            Err(report) => report,
        }
    }

    /// Populates `language` from a BTX file unless it already holds verses.
    ///
    /// The file is not opened when the collection is already populated.
    pub fn load_file(
        &self,
        path: impl AsRef<Path>,
        language: Language,
        encoding: &'static Encoding,
    ) -> LoadReport {
        self.load_file_with(path.as_ref(), language, encoding, LoadMode::IfEmpty)
    }

    /// Clears `language`, then populates it from a BTX file.
    ///
    /// An unreadable file leaves the collection empty.
    pub fn force_reload_file(
        &self,
        path: impl AsRef<Path>,
        language: Language,
        encoding: &'static Encoding,
    ) -> LoadReport {
        self.load_file_with(path.as_ref(), language, encoding, LoadMode::Force)
    }

    /// Populates `language` from any byte stream unless it already holds verses.
    ///
    /// The stream is not read when the collection is already populated.
    pub fn load_reader<R: Read>(
        &self,
        reader: R,
        language: Language,
        encoding: &'static Encoding,
    ) -> LoadReport {
        self.load_reader_with(reader, language, encoding, LoadMode::IfEmpty)
    }

    /// Clears `language`, then populates it from any byte stream.
    ///
    /// A failing stream leaves the collection empty.
    pub fn force_reload_reader<R: Read>(
        &self,
        reader: R,
        language: Language,
        encoding: &'static Encoding,
    ) -> LoadReport {
        self.load_reader_with(reader, language, encoding, LoadMode::Force)
    }

    fn load_reader_with<R: Read>(
        &self,
        mut reader: R,
        language: Language,
        encoding: &'static Encoding,
        mode: LoadMode,
    ) -> LoadReport {
        let _guard = match self.begin_load(language, mode) {
            Ok(guard) => guard,
            Err(report) => return report,
        };
        let mut bytes = Vec::new();
        match reader.read_to_end(&mut bytes) {
            Ok(_) => {
                let text = decode_source(&bytes, encoding, "<reader>");
                self.populate(text.lines(), language)
            }
            Err(source) => self.unavailable(language, "<reader>".to_owned(), source),
        }
    }

    /// Loads every source named in `config`, one report per configured language.
    pub fn load_sources(&self, config: &BibleConfig) -> Vec<LoadReport> {
        Language::ALL
            .iter()
            .filter_map(|&language| match config.source(language) {
                Some(source) => Some(self.load_file(&source.path, language, source.encoding)),
                None => {
                    info!("No {} source configured; collection stays empty", language);
                    None
                }
            })
            .collect()
    }

    /// Empties `language`'s collection.
    pub fn clear(&self, language: Language) {
        let had_verses = {
            let mut collection = self.write(language);
            let had_verses = !collection.verses.is_empty();
            *collection = Collection::default();
            had_verses
        };
        if had_verses {
            self.generation.fetch_add(1, Ordering::AcqRel);
            debug!("Cleared {} collection", language);
        }
    }

    fn load_file_with(
        &self,
        path: &Path,
        language: Language,
        encoding: &'static Encoding,
        mode: LoadMode,
    ) -> LoadReport {
        let _guard = match self.begin_load(language, mode) {
            Ok(guard) => guard,
            Err(report) => return report,
        };
        let name = path.display().to_string();
        info!("Loading {} verses from {} ({})", language, name, encoding.name());
        match fs::read(path) {
            Ok(bytes) => {
                let text = decode_source(&bytes, encoding, &name);
                self.populate(text.lines(), language)
            }
            Err(source) => self.unavailable(language, name, source),
        }
    }

    /// Claims the slot's loading flag and applies the mode's precondition.
    ///
    /// `Err` carries the final report when there is nothing to do.
    fn begin_load(
        &self,
        language: Language,
        mode: LoadMode,
    ) -> std::result::Result<LoadingGuard<'_>, LoadReport> {
        let slot = self.slot(language);
        if slot
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("A {} load is already in progress; skipping", language);
            return Err(LoadReport::new(language, LoadStatus::InProgress));
        }
        let guard = LoadingGuard(&slot.loading);

        match mode {
            LoadMode::IfEmpty => {
                let existing = self.read(language).verses.len();
                if existing > 0 {
                    debug!("{} already holds {} verses; load skipped", language, existing);
                    return Err(LoadReport::new(language, LoadStatus::AlreadyLoaded));
                }
            }
            LoadMode::Force => self.clear(language),
        }
        Ok(guard)
    }

    /// Parses `lines` and installs the result. Caller holds the loading flag.
    fn populate<I, S>(&self, lines: I, language: Language) -> LoadReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let catalog = self.catalogs.get(language);
        let mut collection = Collection::default();
        let mut seen: HashSet<(BookId, u32, u32)> = HashSet::new();
        let mut skipped = SkipCounts::default();

        for (line_index, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            let parsed = btx::parse_line(line, catalog).and_then(|parsed| {
                if seen.insert((parsed.book, parsed.verse.chapter, parsed.verse.verse)) {
                    Ok(parsed)
                } else {
                    Err(SkipReason::Duplicate)
                }
            });
            match parsed {
                Ok(parsed) => {
                    let position = collection.verses.len();
                    collection
                        .chapters
                        .entry((parsed.book, parsed.verse.chapter))
                        .or_default()
                        .push(position);
                    collection.verses.push(parsed.verse);
                }
                Err(reason) => {
                    skipped.record(reason);
                    let err = BibleError::MalformedLine {
                        line: line_index + 1,
                        reason,
                    };
                    debug!("Skipping {} source line: {} ({:?})", language, err, line);
                }
            }
        }

        let loaded = collection.verses.len();
        *self.write(language) = collection;
        self.generation.fetch_add(1, Ordering::AcqRel);

        info!(
            "Loaded {} {} verses ({} lines skipped)",
            loaded,
            language,
            skipped.total()
        );

        if let Some(persistence) = &self.persistence {
            let collection = self.read(language);
            if let Err(e) = persistence.persist_verses(language, &collection.verses) {
                warn!("Write-through of {} verses failed: {}", language, e);
            }
        }

        LoadReport {
            language,
            status: LoadStatus::Loaded,
            loaded,
            skipped,
        }
    }

    fn unavailable(&self, language: Language, path: String, source: std::io::Error) -> LoadReport {
        let err = BibleError::SourceUnavailable { path, source };
        warn!("Could not load {} verses: {}", language, err);
        LoadReport::new(language, LoadStatus::Unavailable(err))
    }

    // ------------------- QUERIES -------------------

    /// Verses of `book` `chapter` in `language`, in file order.
    ///
    /// `book` may be named in either language; it is translated through the
    /// shared catalog position. Unknown books and missing chapters both give
    /// an empty list.
    pub fn get_verses(&self, book: &str, chapter: u32, language: Language) -> Vec<Verse> {
        match self.catalogs.resolve(book) {
            Some(id) => self.verses_for(id, chapter, language),
            None => {
                trace!("get_verses: unknown book {:?}", book);
                Vec::new()
            }
        }
    }

    /// Verses of a book chapter by id, in file order.
    pub fn verses_for(&self, book: BookId, chapter: u32, language: Language) -> Vec<Verse> {
        let collection = self.read(language);
        let verses: Vec<Verse> = collection
            .chapters
            .get(&(book, chapter))
            .map(|positions| {
                positions
                    .iter()
                    .map(|&i| collection.verses[i].clone())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        trace!(
            "get_verses: book={} chapter={} language={} found={}",
            book.code(),
            chapter,
            language,
            verses.len()
        );
        verses
    }

    /// Whether any verse exists for the book chapter, without copying it.
    pub fn has_chapter(&self, book: BookId, chapter: u32, language: Language) -> bool {
        self.read(language).chapters.contains_key(&(book, chapter))
    }

    /// Case-insensitive substring search over verse text, capped by the store's limit.
    pub fn search_verses(&self, query: &str, language: Language) -> Vec<Verse> {
        self.search_verses_limited(query, language, self.search_limit)
    }

    /// Like [`search_verses`](Self::search_verses) with an explicit cap.
    pub fn search_verses_limited(
        &self,
        query: &str,
        language: Language,
        limit: Option<usize>,
    ) -> Vec<Verse> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        let collection = self.read(language);
        let matches = collection
            .verses
            .iter()
            .filter(|verse| verse.text.to_lowercase().contains(&needle))
            .cloned();
        let results: Vec<Verse> = match limit {
            Some(limit) => matches.take(limit).collect(),
            None => matches.collect(),
        };
        debug!(
            "search {:?} in {}: {} results (limit {:?})",
            query,
            language,
            results.len(),
            limit
        );
        results
    }

    /// The whole collection for `language`, in file order.
    pub fn verses(&self, language: Language) -> Vec<Verse> {
        self.read(language).verses.clone()
    }

    pub fn verse_count(&self, language: Language) -> usize {
        self.read(language).verses.len()
    }

    pub fn is_loaded(&self, language: Language) -> bool {
        self.verse_count(language) > 0
    }

    /// Reads through the persistence collaborator; empty when none is attached.
    pub fn persisted_verses(&self, book: &str, chapter: u32) -> Result<Vec<Verse>> {
        match &self.persistence {
            Some(persistence) => persistence.query_verses(book, chapter),
            None => Ok(Vec::new()),
        }
    }

    // ------------------- LOCKING -------------------

    fn slot(&self, language: Language) -> &Slot {
        &self.slots[language.slot()]
    }

    /// Records are immutable once installed, so a poisoned lock still holds
    /// a consistent collection.
    fn read(&self, language: Language) -> RwLockReadGuard<'_, Collection> {
        self.slot(language).collection.read().unwrap_or_else(|poisoned| {
            warn!("{} collection lock was poisoned; continuing", language);
            poisoned.into_inner()
        })
    }

    fn write(&self, language: Language) -> RwLockWriteGuard<'_, Collection> {
        self.slot(language).collection.write().unwrap_or_else(|poisoned| {
            warn!("{} collection lock was poisoned; continuing", language);
            poisoned.into_inner()
        })
    }
}

impl Default for VerseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for VerseStore {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("VerseStore")
            .field("korean", &self.verse_count(Language::Korean))
            .field("english", &self.verse_count(Language::English))
            .field("generation", &self.generation())
            .field("search_limit", &self.search_limit)
            .field("persistence", &self.persistence.is_some())
            .finish()
    }
}
