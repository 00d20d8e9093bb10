//! Pipeline stages for resume skill analysis.
//!
//! Each submodule implements exactly one transformation step, so each can be
//! tested on its own and swapped without touching the others.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ normalize ──▶ clean ──▶ count
//! (path/URL) (pdfium)   (detect +     (lines)   (substring
//!                        translate)              counts)
//! ```
//!
//! 1. [`input`]    : load a local file or URL into a named in-memory [`input::Document`]
//! 2. [`extract`]  : concatenate the text of every page; runs in
//!    `spawn_blocking` because pdfium is not async-safe
//! 3. [`normalize`]: detect the language and translate into the target
//!    language, keeping the original text if translation fails
//! 4. [`translate`]: the translation service seam and its LLM implementation
//! 5. [`clean`]    : the fixed whitespace transform that counts are defined over
//! 6. [`count`]    : case-insensitive substring counts per skill label

pub mod clean;
pub mod count;
pub mod extract;
pub mod input;
pub mod normalize;
pub mod translate;
