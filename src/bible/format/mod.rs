//! Text format parsing layer.
//!
//! - [`btx`]: one BTX source line -> one verse record (or a skip reason)
//! - [`reference`]: user-typed `<book> <chapter>:<verse>` references
//!
//! Neither parser touches the store; they are pure functions over `&str`.

pub mod btx;
pub mod reference;
