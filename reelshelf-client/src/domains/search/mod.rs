//! Search domain - debouncing of the free-text query

pub mod debounce;

pub use self::debounce::{DebounceTicket, SearchDebouncer};
