//! Core verse store and navigator
//!
//! # Module Organization
//!
//! - [`catalog`]: the two 66-book tables and cross-language name resolution
//! - [`format`]: BTX line parsing and reference parsing
//! - [`store`]: per-language verse collections, loading and queries
//! - [`navigator`]: the reading cursor and all movement
//! - [`session`]: a navigator behind a FIFO job queue
//! - [`config`]: runtime settings, from code or the environment
//!
//! # Flow
//!
//! ```text
//! BTX source ──load──▶ VerseStore ◀──get_verses── Navigator ──Snapshot──▶ UI
//!                      (Korean, English)          (cursor)
//! ```
//!
//! # Example
//! ```no_run
//! # use std::sync::Arc;
//! # use bible_reader::{Language, Navigator, VerseStore};
//! let store = Arc::new(VerseStore::new());
//! store.load_file("knrv.btx", Language::Korean, encoding_rs::UTF_8);
//! store.load_file("niv.btx", Language::English, encoding_rs::UTF_8);
//!
//! let mut navigator = Navigator::new(store);
//! navigator.jump_to("Genesis 1:1").unwrap();
//! navigator.next().unwrap();
//! println!("{:?}", navigator.snapshot());
//! ```

pub mod catalog;
pub mod config;
pub mod format;
pub mod navigator;
pub mod session;
pub mod store;
pub mod types;
pub mod utils;

pub use catalog::{BookCatalog, BookId, Catalogs, BOOK_COUNT};
pub use config::{BibleConfig, SourceSpec};
pub use navigator::Navigator;
pub use session::NavigatorHandle;
pub use store::{VersePersistence, VerseStore};
pub use types::error::{BibleError, Result};
