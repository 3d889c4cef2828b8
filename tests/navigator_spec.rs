mod common;

use bible_reader::{BibleConfig, BibleError, Boundary, Language, Navigator, VerseStore};
use common::{fixture_navigator, fixture_store, store_from};
use std::sync::Arc;

const PLACEHOLDER: &str = "Translation not available";

fn genesis_only() -> Arc<VerseStore> {
    store_from(
        &[
            "01 1:1 가", "01 1:2 나", "01 1:3 다",
            "01 2:1 라", "01 2:2 마",
            "01 3:1 바",
        ],
        &[
            "01 1:1 a", "01 1:2 b", "01 1:3 c",
            "01 2:1 d", "01 2:2 e",
            "01 3:1 f",
        ],
    )
}

fn position(navigator: &Navigator) -> (String, u32, u32) {
    let cursor = navigator.cursor().expect("positioned");
    (cursor.book, cursor.chapter, cursor.verse)
}

fn at(book: &str, chapter: u32, verse: u32) -> (String, u32, u32) {
    (book.to_string(), chapter, verse)
}

#[test]
fn next_walks_every_verse_then_stops_at_the_end() {
    let mut navigator = Navigator::new(genesis_only());
    navigator.load_chapter("창세기", 1).expect("load");

    let mut visited = vec![(navigator.cursor().unwrap().chapter, navigator.cursor().unwrap().verse)];
    loop {
        match navigator.next() {
            Ok(cursor) => visited.push((cursor.chapter, cursor.verse)),
            Err(BibleError::CorpusBoundary(Boundary::End)) => break,
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    assert_eq!(visited, vec![(1, 1), (1, 2), (1, 3), (2, 1), (2, 2), (3, 1)]);
    assert_eq!(position(&navigator), at("창세기", 3, 1));
}

#[test]
fn previous_retraces_next_in_reverse() {
    let mut navigator = Navigator::new(genesis_only());
    navigator.jump_to("창세기 3:1").expect("jump");

    let mut visited = vec![(3, 1)];
    while let Ok(cursor) = navigator.previous() {
        visited.push((cursor.chapter, cursor.verse));
    }
    visited.reverse();

    assert_eq!(visited, vec![(1, 1), (1, 2), (1, 3), (2, 1), (2, 2), (3, 1)]);
    assert!(matches!(
        navigator.previous(),
        Err(BibleError::CorpusBoundary(Boundary::Start))
    ));
}

#[test]
fn load_chapter_positions_at_first_verse() {
    let mut navigator = fixture_navigator();
    assert!(!navigator.is_positioned());

    let cursor = navigator.load_chapter("Genesis", 2).expect("load");
    assert_eq!(cursor.book, "창세기");
    assert_eq!((cursor.chapter, cursor.verse, cursor.index), (2, 1, 0));
    assert_eq!(navigator.verse_numbers(), vec![1, 2]);
}

#[test]
fn next_rolls_over_into_the_next_book() {
    let mut navigator = fixture_navigator();
    navigator.jump_to("창세기 2:2").expect("jump");

    let cursor = navigator.next().expect("next");
    assert_eq!((cursor.book.as_str(), cursor.chapter, cursor.verse), ("출애굽기", 1, 1));
}

#[test]
fn next_at_the_last_verse_reports_end_and_stays() {
    let mut navigator = fixture_navigator();
    navigator.jump_to("요한계시록 22:21").expect("jump");

    let err = navigator.next().unwrap_err();
    assert!(matches!(err, BibleError::CorpusBoundary(Boundary::End)));
    assert_eq!(position(&navigator), at("요한계시록", 22, 21));
}

#[test]
fn next_stops_when_the_following_book_has_no_first_chapter() {
    let mut navigator = fixture_navigator();
    navigator.jump_to("출애굽기 1:2").expect("jump");

    assert!(matches!(
        navigator.next(),
        Err(BibleError::CorpusBoundary(Boundary::End))
    ));
    assert_eq!(position(&navigator), at("출애굽기", 1, 2));
}

#[test]
fn previous_moves_to_the_last_verse_of_the_previous_chapter() {
    let mut navigator = fixture_navigator();
    navigator.jump_to("창세기 2:1").expect("jump");

    let cursor = navigator.previous().expect("previous");
    assert_eq!((cursor.chapter, cursor.verse, cursor.index), (1, 3, 2));
}

#[test]
fn previous_moves_to_the_last_verse_of_the_previous_book() {
    let mut navigator = fixture_navigator();
    navigator.jump_to("Exodus 1:1").expect("jump");

    let cursor = navigator.previous().expect("previous");
    assert_eq!((cursor.book.as_str(), cursor.chapter, cursor.verse), ("창세기", 2, 2));
}

#[test]
fn previous_at_the_first_verse_reports_start_and_stays() {
    let mut navigator = fixture_navigator();
    navigator.jump_to("창세기 1:1").expect("jump");

    assert!(matches!(
        navigator.previous(),
        Err(BibleError::CorpusBoundary(Boundary::Start))
    ));
    assert_eq!(position(&navigator), at("창세기", 1, 1));
}

#[test]
fn movement_before_any_chapter_is_unpositioned() {
    let mut navigator = fixture_navigator();
    assert!(matches!(navigator.next(), Err(BibleError::Unpositioned)));
    assert!(matches!(navigator.previous(), Err(BibleError::Unpositioned)));
    assert!(matches!(navigator.select_verse(1), Err(BibleError::Unpositioned)));
    assert!(matches!(navigator.refresh(), Err(BibleError::Unpositioned)));
    assert!(navigator.cursor().is_none());
    assert!(navigator.snapshot().is_none());
    assert!(navigator.verse_numbers().is_empty());
}

#[test]
fn failed_moves_leave_the_cursor_alone() {
    let mut navigator = fixture_navigator();
    navigator.jump_to("창세기 1:2").expect("jump");
    let before = navigator.cursor();

    match navigator.load_chapter("창세기", 40) {
        Err(BibleError::ChapterNotFound { book, chapter }) => {
            assert_eq!((book.as_str(), chapter), ("창세기", 40));
        }
        other => panic!("expected ChapterNotFound, got {:?}", other),
    }
    assert_eq!(navigator.cursor(), before);

    match navigator.select_verse(9) {
        Err(BibleError::VerseNotFound { chapter, verse, .. }) => assert_eq!((chapter, verse), (1, 9)),
        other => panic!("expected VerseNotFound, got {:?}", other),
    }
    assert_eq!(navigator.cursor(), before);

    match navigator.load_chapter("Gospel of Thomas", 1) {
        Err(BibleError::BookNotFound(name)) => assert_eq!(name, "Gospel of Thomas"),
        other => panic!("expected BookNotFound, got {:?}", other),
    }
    assert_eq!(navigator.cursor(), before);
}

#[test]
fn select_verse_moves_within_the_chapter() {
    let mut navigator = fixture_navigator();
    navigator.load_chapter("창세기", 1).expect("load");

    let cursor = navigator.select_verse(3).expect("select");
    assert_eq!((cursor.verse, cursor.index), (3, 2));
}

#[test]
fn snapshot_pairs_both_languages() {
    let mut navigator = fixture_navigator();
    navigator.jump_to("창세기 1:1").expect("jump");

    let snapshot = navigator.snapshot().expect("snapshot");
    assert_eq!(snapshot.book, "창세기");
    assert_eq!((snapshot.chapter, snapshot.verse), (1, 1));
    assert_eq!(snapshot.primary_text, "태초에 하나님이 천지를 창조하시니라");
    assert_eq!(
        snapshot.secondary_text,
        "In the beginning God created the heavens and the earth."
    );
    assert_eq!(snapshot.available_books.len(), 66);
    assert_eq!(snapshot.available_books[0], "창세기");
    assert_eq!(snapshot.available_books[65], "요한계시록");
}

#[test]
fn shorter_secondary_chapter_shows_placeholder() {
    let mut navigator = fixture_navigator();
    navigator.jump_to("출애굽기 1:1").expect("jump");
    assert_ne!(navigator.snapshot().unwrap().secondary_text, PLACEHOLDER);

    navigator.next().expect("next");
    let snapshot = navigator.snapshot().expect("snapshot");
    assert_eq!(snapshot.verse, 2);
    assert_eq!(snapshot.primary_text, "르우벤과 시므온과 레위와 유다와");
    assert_eq!(snapshot.secondary_text, PLACEHOLDER);
}

#[test]
fn placeholder_is_configurable() {
    let mut navigator = fixture_navigator().with_placeholder("(없음)");
    navigator.jump_to("출애굽기 1:2").expect("jump");
    assert_eq!(navigator.snapshot().unwrap().secondary_text, "(없음)");
}

#[test]
fn jump_accepts_either_language() {
    let mut korean = fixture_navigator();
    let mut english = fixture_navigator();

    let by_korean = korean.jump_to("창세기 1:1").expect("korean");
    let by_english = english.jump_to("Genesis 1:1").expect("english");
    assert_eq!(by_korean, by_english);
    assert_eq!(korean.snapshot(), english.snapshot());

    let lower = english.jump_to("genesis 2:2").expect("lower case");
    let upper = english.jump_to("GENESIS 2:2").expect("upper case");
    assert_eq!(lower, upper);

    let padded = english.jump_to("   Revelation   22:21  ").expect("padded");
    assert_eq!(padded.verse, 21);
}

#[test]
fn jump_failures_name_the_problem() {
    let mut navigator = fixture_navigator();
    navigator.jump_to("창세기 1:1").expect("jump");
    let before = navigator.cursor();

    assert!(matches!(navigator.jump_to("Genesis"), Err(BibleError::ReferenceParse(_))));
    assert!(matches!(navigator.jump_to("Genesis 1"), Err(BibleError::ReferenceParse(_))));
    assert!(matches!(navigator.jump_to(""), Err(BibleError::ReferenceParse(_))));
    assert!(matches!(navigator.jump_to("Narnia 1:1"), Err(BibleError::BookNotFound(_))));
    assert!(matches!(
        navigator.jump_to("Genesis 9:1"),
        Err(BibleError::ChapterNotFound { chapter: 9, .. })
    ));
    assert!(matches!(
        navigator.jump_to("Genesis 1:99"),
        Err(BibleError::VerseNotFound { chapter: 1, verse: 99, .. })
    ));

    assert_eq!(navigator.cursor(), before);
}

#[test]
fn start_uses_the_configured_reference() {
    let mut navigator = fixture_navigator();
    let cursor = navigator.start().expect("start");
    assert_eq!((cursor.book.as_str(), cursor.chapter, cursor.verse), ("창세기", 1, 1));

    let mut navigator = fixture_navigator().with_start_reference("Exodus 1:2");
    assert_eq!(navigator.start().expect("start").verse, 2);
}

#[test]
fn last_chapter_is_probed_from_chapter_one() {
    let navigator = fixture_navigator();
    assert_eq!(navigator.find_last_chapter("창세기").unwrap(), 2);
    assert_eq!(navigator.find_last_chapter("Exodus").unwrap(), 1);
    assert_eq!(navigator.chapter_numbers("Genesis").unwrap(), vec![1, 2]);

    // The fixture's Revelation starts at chapter 21, so probing finds nothing.
    assert!(matches!(
        navigator.find_last_chapter("Revelation"),
        Err(BibleError::ChapterNotFound { chapter: 1, .. })
    ));
    assert!(matches!(
        navigator.find_last_chapter("Leviticus"),
        Err(BibleError::ChapterNotFound { .. })
    ));
    assert!(matches!(
        navigator.find_last_chapter("Narnia"),
        Err(BibleError::BookNotFound(_))
    ));
}

#[test]
fn last_verse_is_the_highest_number_not_the_count() {
    let navigator = fixture_navigator();
    assert_eq!(navigator.find_last_verse("요한계시록", 22).unwrap(), 21);
    assert_eq!(navigator.find_last_verse("Genesis", 1).unwrap(), 3);
    assert!(matches!(
        navigator.find_last_verse("Genesis", 7),
        Err(BibleError::ChapterNotFound { chapter: 7, .. })
    ));
}

#[test]
fn last_chapter_follows_a_reload() {
    let store = genesis_only();
    let navigator = Navigator::new(Arc::clone(&store));
    assert_eq!(navigator.find_last_chapter("Genesis").unwrap(), 3);

    store.force_reload(["01 1:1 가", "01 2:1 나"], Language::Korean);
    assert_eq!(navigator.find_last_chapter("Genesis").unwrap(), 2);

    store.clear(Language::Korean);
    assert!(navigator.find_last_chapter("Genesis").is_err());
}

#[test]
fn refresh_picks_up_reloaded_text() {
    let store = genesis_only();
    let mut navigator = Navigator::new(Arc::clone(&store));
    navigator.jump_to("창세기 1:2").expect("jump");

    store.force_reload(["01 1:1 새", "01 1:2 새 본문"], Language::Korean);
    assert_eq!(navigator.snapshot().unwrap().primary_text, "나");

    let cursor = navigator.refresh().expect("refresh");
    assert_eq!(cursor.verse, 2);
    assert_eq!(navigator.snapshot().unwrap().primary_text, "새 본문");

    store.force_reload(["01 1:1 only"], Language::Korean);
    assert_eq!(navigator.refresh().expect("refresh").verse, 1);

    store.clear(Language::Korean);
    assert!(matches!(
        navigator.refresh(),
        Err(BibleError::ChapterNotFound { .. })
    ));
    assert_eq!(navigator.cursor().unwrap().verse, 1);
}

#[test]
fn english_primary_swaps_the_columns() {
    let mut navigator = fixture_navigator().with_primary_language(Language::English);
    assert_eq!(navigator.secondary_language(), Language::Korean);

    let cursor = navigator.jump_to("출애굽기 1:1").expect("jump");
    assert_eq!(cursor.book, "Exodus");
    assert_eq!(navigator.verse_numbers(), vec![1]);

    let snapshot = navigator.snapshot().unwrap();
    assert!(snapshot.primary_text.starts_with("These are the names"));
    assert!(snapshot.secondary_text.starts_with("야곱과"));
    assert_eq!(snapshot.available_books[0], "Genesis");

    // English Exodus ends at verse 1, so the next step leaves the book.
    assert!(matches!(
        navigator.next(),
        Err(BibleError::CorpusBoundary(Boundary::End))
    ));
}

#[test]
fn from_config_applies_settings() {
    let config = BibleConfig {
        primary_language: Language::English,
        placeholder: "n/a".to_string(),
        start_reference: "Genesis 2:1".to_string(),
        ..BibleConfig::default()
    };
    let mut navigator = Navigator::from_config(fixture_store(), &config);
    assert_eq!(navigator.primary_language(), Language::English);

    let cursor = navigator.start().expect("start");
    assert_eq!((cursor.book.as_str(), cursor.chapter, cursor.verse), ("Genesis", 2, 1));
}

#[test]
fn navigator_on_empty_store_reports_missing_chapters() {
    let mut navigator = Navigator::new(Arc::new(VerseStore::new()));
    assert!(matches!(
        navigator.start(),
        Err(BibleError::ChapterNotFound { chapter: 1, .. })
    ));
    assert!(!navigator.is_positioned());
}

#[test]
fn four_steps_cross_the_chapter_and_the_fifth_hits_the_end() {
    let store = store_from(
        &["01 1:1 가", "01 1:2 나", "01 1:3 다", "01 2:1 라", "01 2:2 마"],
        &["01 1:1 a", "01 1:2 b", "01 1:3 c", "01 2:1 d", "01 2:2 e"],
    );
    let mut navigator = Navigator::new(store);
    navigator.jump_to("Genesis 1:1").expect("jump");

    for _ in 0..4 {
        navigator.next().expect("next");
    }
    assert_eq!(position(&navigator), at("창세기", 2, 2));

    assert!(matches!(
        navigator.next(),
        Err(BibleError::CorpusBoundary(Boundary::End))
    ));
    assert_eq!(position(&navigator), at("창세기", 2, 2));
}

#[test]
fn last_verse_ignores_file_order() {
    let store = store_from(&["01 1:3 다", "01 1:1 가", "01 1:2 나"], &[]);
    let mut navigator = Navigator::new(store);
    assert_eq!(navigator.find_last_verse("창세기", 1).unwrap(), 3);

    navigator.load_chapter("창세기", 1).expect("load");
    assert_eq!(navigator.verse_numbers(), vec![3, 1, 2]);
    assert_eq!(navigator.snapshot().unwrap().secondary_text, PLACEHOLDER);
}

#[test]
fn next_from_the_highest_chapter_number_does_not_overflow() {
    let store = store_from(&["66 4294967295:1 끝"], &["66 4294967295:1 end"]);
    let mut navigator = Navigator::new(store);
    navigator.load_chapter("요한계시록", u32::MAX).expect("load");

    assert!(matches!(
        navigator.next(),
        Err(BibleError::CorpusBoundary(Boundary::End))
    ));
    assert_eq!(position(&navigator), at("요한계시록", u32::MAX, 1));
}

#[test]
fn next_from_the_highest_chapter_number_rolls_into_the_next_book() {
    let store = store_from(&["01 4294967295:1 가", "02 1:1 나"], &[]);
    let mut navigator = Navigator::new(store);
    navigator.load_chapter("창세기", u32::MAX).expect("load");

    let cursor = navigator.next().expect("next");
    assert_eq!((cursor.book.as_str(), cursor.chapter, cursor.verse), ("출애굽기", 1, 1));
}

#[test]
fn last_chapter_is_probed_per_primary_language() {
    let store = store_from(&["01 1:1 가", "01 2:1 나", "01 3:1 다"], &["01 1:1 a"]);

    let korean = Navigator::new(Arc::clone(&store));
    assert_eq!(korean.find_last_chapter("Genesis").unwrap(), 3);

    let english = korean.with_primary_language(Language::English);
    assert_eq!(english.find_last_chapter("Genesis").unwrap(), 1);

    let korean = english.with_primary_language(Language::Korean);
    assert_eq!(korean.find_last_chapter("Genesis").unwrap(), 3);
}

#[test]
fn previous_book_rollover_uses_the_primary_language_chapters() {
    let store = store_from(
        &["01 1:1 가", "01 2:1 나", "01 3:1 다", "02 1:1 라"],
        &["01 1:1 a", "02 1:1 b"],
    );
    let korean = Navigator::new(store);
    assert_eq!(korean.find_last_chapter("Genesis").unwrap(), 3);

    let mut english = korean.with_primary_language(Language::English);
    english.jump_to("Exodus 1:1").expect("jump");
    let cursor = english.previous().expect("previous");
    assert_eq!((cursor.book.as_str(), cursor.chapter, cursor.verse), ("Genesis", 1, 1));
}
