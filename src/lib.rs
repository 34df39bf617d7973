//! Convert documents to markdown, HTML or JSON and describe the result as a
//! JSON envelope.
//!
//! Two converters share the same envelope: [`converter`] parses EPUB, DOCX and
//! markdown with real document readers, [`mock`] approximates the output of
//! the real one with text heuristics on UTF-8 input.

pub mod cli;
pub mod converter;
pub mod document;
pub mod emit;
pub mod envelope;
pub mod error;
pub mod markdown;
pub mod mock;
pub mod reader;

mod docx_markdown;
mod docx_reader;
mod epub_reader;
mod metadata;
mod text_reader;

pub use cli::{ConversionRequest, OutputFormat};
pub use envelope::ConversionResult;
pub use error::ConvertError;
