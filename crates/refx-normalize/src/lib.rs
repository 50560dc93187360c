//! Normalization of raw reference rows into the canonical record model.
//!
//! The mapping rules here are empirical: they were derived by comparing real
//! library databases against the exports the target schema accepts. All
//! tunable policy (type remapping, periodical heuristics, abbreviation
//! bounds) lives in [`NormalizerConfig`] and is injected into the
//! [`Normalizer`] rather than baked in.

mod config;
mod normalizer;
pub mod text;
pub mod timestamp;

pub use config::NormalizerConfig;
pub use normalizer::Normalizer;
pub use text::{normalize_line_endings, split_keywords, split_name_lines};
pub use timestamp::{epoch_iso, format_access_date, iso_second, parse_epoch};
