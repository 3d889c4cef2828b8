//! Static book catalogs and the cross-language book index.
//!
//! Both tables list the 66 canonical books in the same order, so the Nth
//! Korean name and the Nth English name always denote the same book. That
//! shared position is the only link between the two languages: verse
//! records carry a book *name*, and [`Catalogs`] turns any name from either
//! table back into a [`BookId`].

use std::collections::HashMap;

use super::types::models::Language;

/// Number of books in each catalog.
pub const BOOK_COUNT: usize = 66;

const KOREAN_BOOKS: [&str; BOOK_COUNT] = [
    "창세기", "출애굽기", "레위기", "민수기", "신명기",
    "여호수아", "사사기", "룻기", "사무엘상", "사무엘하",
    "열왕기상", "열왕기하", "역대상", "역대하", "에스라",
    "느헤미야", "에스더", "욥기", "시편", "잠언",
    "전도서", "아가", "이사야", "예레미야", "예레미야 애가",
    "에스겔", "다니엘", "호세아", "요엘", "아모스",
    "오바댜", "요나", "미가", "나훔", "하박국",
    "스바냐", "학개", "스가랴", "말라기", "마태복음",
    "마가복음", "누가복음", "요한복음", "사도행전", "로마서",
    "고린도전서", "고린도후서", "갈라디아서", "에베소서", "빌립보서",
    "골로새서", "데살로니가전서", "데살로니가후서", "디모데전서", "디모데후서",
    "디도서", "빌레몬서", "히브리서", "야고보서", "베드로전서",
    "베드로후서", "요한1서", "요한2서", "요한3서", "유다서",
    "요한계시록",
];

const ENGLISH_BOOKS: [&str; BOOK_COUNT] = [
    "Genesis", "Exodus", "Leviticus", "Numbers", "Deuteronomy",
    "Joshua", "Judges", "Ruth", "1 Samuel", "2 Samuel",
    "1 Kings", "2 Kings", "1 Chronicles", "2 Chronicles", "Ezra",
    "Nehemiah", "Esther", "Job", "Psalms", "Proverbs",
    "Ecclesiastes", "Song of Songs", "Isaiah", "Jeremiah", "Lamentations",
    "Ezekiel", "Daniel", "Hosea", "Joel", "Amos",
    "Obadiah", "Jonah", "Micah", "Nahum", "Habakkuk",
    "Zephaniah", "Haggai", "Zechariah", "Malachi", "Matthew",
    "Mark", "Luke", "John", "Acts", "Romans",
    "1 Corinthians", "2 Corinthians", "Galatians", "Ephesians", "Philippians",
    "Colossians", "1 Thessalonians", "2 Thessalonians", "1 Timothy", "2 Timothy",
    "Titus", "Philemon", "Hebrews", "James", "1 Peter",
    "2 Peter", "1 John", "2 John", "3 John", "Jude",
    "Revelation",
];

/// A canonical book, identified by its 1-based catalog code (`01`..`66`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BookId(u8);

impl BookId {
    pub const FIRST: BookId = BookId(1);
    pub const LAST: BookId = BookId(BOOK_COUNT as u8);

    /// Parses a two-digit, zero-padded code such as `"01"` or `"66"`.
    pub fn from_code(code: &str) -> Option<Self> {
        if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        code.parse::<u8>().ok().and_then(Self::from_number)
    }

    /// Book by 1-based number.
    pub fn from_number(number: u8) -> Option<Self> {
        (1..=BOOK_COUNT as u8).contains(&number).then_some(BookId(number))
    }

    /// Book by 0-based catalog position.
    pub fn from_position(position: usize) -> Option<Self> {
        if position < BOOK_COUNT {
            Some(BookId(position as u8 + 1))
        } else {
            None
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn position(self) -> usize {
        self.0 as usize - 1
    }

    /// Zero-padded two-digit code.
    pub fn code(self) -> String {
        format!("{:02}", self.0)
    }

    /// The following book in canonical order, if any.
    pub fn next(self) -> Option<Self> {
        Self::from_number(self.0 + 1)
    }

    /// The preceding book in canonical order, if any.
    pub fn previous(self) -> Option<Self> {
        self.0.checked_sub(1).and_then(Self::from_number)
    }

    /// All books in canonical order.
    pub fn all() -> impl Iterator<Item = BookId> {
        (1..=BOOK_COUNT as u8).map(BookId)
    }
}

/// One language's ordered code -> name table with its reverse index.
#[derive(Debug)]
pub struct BookCatalog {
    language: Language,
    names: &'static [&'static str; BOOK_COUNT],
    by_name: HashMap<String, BookId>,
}

impl BookCatalog {
    pub fn new(language: Language) -> Self {
        let names = match language {
            Language::Korean => &KOREAN_BOOKS,
            Language::English => &ENGLISH_BOOKS,
        };
        let by_name = BookId::all()
            .map(|id| (fold(language, names[id.position()]), id))
            .collect();
        Self {
            language,
            names,
            by_name,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Name of a book in this catalog's language.
    pub fn name(&self, id: BookId) -> &'static str {
        self.names[id.position()]
    }

    /// Name for a two-digit code, e.g. `"01"` -> `"Genesis"`.
    pub fn name_for_code(&self, code: &str) -> Option<&'static str> {
        BookId::from_code(code).map(|id| self.name(id))
    }

    /// Exact name lookup; English names also match case-insensitively.
    pub fn lookup(&self, name: &str) -> Option<BookId> {
        self.by_name.get(&fold(self.language, name)).copied()
    }

    /// Names in canonical order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names.iter().copied()
    }
}

fn fold(language: Language, name: &str) -> String {
    match language {
        Language::English => name.to_lowercase(),
        Language::Korean => name.to_owned(),
    }
}

/// Both catalogs, with name resolution across languages.
#[derive(Debug)]
pub struct Catalogs {
    korean: BookCatalog,
    english: BookCatalog,
}

impl Catalogs {
    pub fn new() -> Self {
        Self {
            korean: BookCatalog::new(Language::Korean),
            english: BookCatalog::new(Language::English),
        }
    }

    pub fn get(&self, language: Language) -> &BookCatalog {
        match language {
            Language::Korean => &self.korean,
            Language::English => &self.english,
        }
    }

    /// Resolves a book name from either catalog. Korean is tried first.
    pub fn resolve(&self, name: &str) -> Option<BookId> {
        self.resolve_with_language(name).map(|(id, _)| id)
    }

    /// Like [`resolve`](Self::resolve), also reporting which catalog matched.
    pub fn resolve_with_language(&self, name: &str) -> Option<(BookId, Language)> {
        let name = name.trim();
        Language::ALL
            .iter()
            .find_map(|&language| self.get(language).lookup(name).map(|id| (id, language)))
    }

    /// Translates a book name (in either language) into `target`'s name.
    pub fn translate(&self, name: &str, target: Language) -> Option<&'static str> {
        self.resolve(name).map(|id| self.get(target).name(id))
    }

    /// Name of `id` in `language`.
    pub fn name(&self, id: BookId, language: Language) -> &'static str {
        self.get(language).name(id)
    }
}

impl Default for Catalogs {
    fn default() -> Self {
        Self::new()
    }
}
