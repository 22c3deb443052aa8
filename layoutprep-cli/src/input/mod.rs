//! Input handling module

pub mod glob_resolver;
pub mod word_reader;

pub use glob_resolver::resolve_documents;
pub use word_reader::WordReader;
