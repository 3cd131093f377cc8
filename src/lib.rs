//! Batch translation of machine touchscreen UI JSON files.
//!
//! A two-phase pipeline: phase 1 backfills empty `description` fields and
//! generates a disambiguating context for every UI string via Azure OpenAI;
//! phase 2 translates every file into each DeepL target language, reusing the
//! cached contexts, and writes one output folder per language.

pub mod backfill;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod deepl;
pub mod error;
pub mod keypath;
pub mod openai;
pub mod pipeline;
pub mod translate;
