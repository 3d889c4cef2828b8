#![allow(dead_code)]

use bible_reader::{Language, LoadStatus, Navigator, VerseStore};
use std::path::PathBuf;
use std::sync::Arc;

pub fn fixture_path(parts: &[&str]) -> PathBuf {
    let mut p = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    for part in parts {
        p.push(part);
    }
    p
}

/// Store holding tests/fixtures/ko.btx and en.btx.
///
/// Korean: Genesis 1:1-3, 2:1-2; Exodus 1:1-2; Revelation 21:1, 22:1, 22:21.
/// English: the same except Exodus 1 only has verse 1.
pub fn fixture_store() -> Arc<VerseStore> {
    let store = VerseStore::new();
    for (name, language) in [("ko.btx", Language::Korean), ("en.btx", Language::English)] {
        let report = store.load_file(
            fixture_path(&["tests", "fixtures", name]),
            language,
            encoding_rs::UTF_8,
        );
        assert!(
            matches!(report.status, LoadStatus::Loaded),
            "fixture {} failed to load: {:?}",
            name,
            report.status
        );
    }
    Arc::new(store)
}

pub fn fixture_navigator() -> Navigator {
    Navigator::new(fixture_store())
}

/// Store built from inline lines for both languages.
pub fn store_from(korean: &[&str], english: &[&str]) -> Arc<VerseStore> {
    let store = VerseStore::new();
    store.load(korean.iter().copied(), Language::Korean);
    store.load(english.iter().copied(), Language::English);
    Arc::new(store)
}
