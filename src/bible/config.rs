//! Runtime configuration for loading and navigating the corpus.

use std::path::PathBuf;

use encoding_rs::{Encoding, UTF_8};
use log::warn;

use super::types::models::Language;
use super::utils::parse_encoding;

pub const DEFAULT_SEARCH_LIMIT: usize = 20;
pub const DEFAULT_PLACEHOLDER: &str = "Translation not available";
pub const DEFAULT_START_REFERENCE: &str = "창세기 1:1";

/// Where one language's BTX text lives and how its bytes are encoded.
#[derive(Debug, Clone)]
pub struct SourceSpec {
    pub path: PathBuf,
    pub encoding: &'static Encoding,
}

impl SourceSpec {
    /// A UTF-8 source.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            encoding: UTF_8,
        }
    }

    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }
}

#[derive(Debug, Clone)]
pub struct BibleConfig {
    /// Display language; the other one is shown alongside it.
    pub primary_language: Language,
    /// Cap on search results, `None` for unlimited.
    pub search_limit: Option<usize>,
    /// Secondary text shown when the secondary chapter is shorter.
    pub placeholder: String,
    pub korean_source: Option<SourceSpec>,
    pub english_source: Option<SourceSpec>,
    /// Reference the navigator starts at.
    pub start_reference: String,
}

impl Default for BibleConfig {
    fn default() -> Self {
        Self {
            primary_language: Language::Korean,
            search_limit: Some(DEFAULT_SEARCH_LIMIT),
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            korean_source: None,
            english_source: None,
            start_reference: DEFAULT_START_REFERENCE.to_owned(),
        }
    }
}

impl BibleConfig {
    /// Reads `BIBLE_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset or invalid keys keep defaults.
    ///
    /// | key | meaning |
    /// |-----|---------|
    /// | `BIBLE_PRIMARY` | `ko` or `en` |
    /// | `BIBLE_SEARCH_LIMIT` | result cap, `0` for unlimited |
    /// | `BIBLE_PLACEHOLDER` | missing-translation text |
    /// | `BIBLE_KO_PATH`, `BIBLE_EN_PATH` | source files |
    /// | `BIBLE_KO_ENCODING`, `BIBLE_EN_ENCODING` | source encodings |
    /// | `BIBLE_START` | start reference |
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("BIBLE_PRIMARY") {
            match Language::from_label(&raw) {
                Some(language) => config.primary_language = language,
                None => warn!("Ignoring BIBLE_PRIMARY={:?}: expected ko or en", raw),
            }
        }

        if let Some(raw) = lookup("BIBLE_SEARCH_LIMIT") {
            match raw.trim().parse::<usize>() {
                Ok(0) => config.search_limit = None,
                Ok(limit) => config.search_limit = Some(limit),
                Err(_) => warn!("Ignoring BIBLE_SEARCH_LIMIT={:?}: not a number", raw),
            }
        }

        if let Some(placeholder) = lookup("BIBLE_PLACEHOLDER") {
            config.placeholder = placeholder;
        }

        config.korean_source = source_from_vars(&lookup, "BIBLE_KO_PATH", "BIBLE_KO_ENCODING");
        config.english_source = source_from_vars(&lookup, "BIBLE_EN_PATH", "BIBLE_EN_ENCODING");

        if let Some(start) = lookup("BIBLE_START").filter(|s| !s.trim().is_empty()) {
            config.start_reference = start;
        }

        config
    }

    /// The language shown next to the primary one.
    pub fn secondary_language(&self) -> Language {
        self.primary_language.other()
    }

    pub fn source(&self, language: Language) -> Option<&SourceSpec> {
        match language {
            Language::Korean => self.korean_source.as_ref(),
            Language::English => self.english_source.as_ref(),
        }
    }
}

fn source_from_vars<F>(lookup: &F, path_key: &str, encoding_key: &str) -> Option<SourceSpec>
where
    F: Fn(&str) -> Option<String>,
{
    let path = lookup(path_key).filter(|p| !p.trim().is_empty())?;
    let mut source = SourceSpec::new(path);
    if let Some(label) = lookup(encoding_key) {
        source = source.with_encoding(parse_encoding(&label));
    }
    Some(source)
}
