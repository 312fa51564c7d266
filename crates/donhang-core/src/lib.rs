//! Core library for Vietnamese shipping-order extraction.
//!
//! This crate provides:
//! - A colloquial Vietnamese number/money normalizer ("2 triệu rưỡi", "150k")
//! - Field extractors for phone, COD, declared value, name, product, weight
//!   and address, each consuming its match from a shared residual text
//! - A deterministic pipeline assembling a canonical order draft plus the
//!   raw matched substrings behind it
//!
//! The pipeline is a pure function of one message: no I/O, no shared state,
//! no errors beyond an optional input-length cap.

pub mod error;
pub mod models;
pub mod order;

pub use error::{ConfigError, ExtractError, Result};
pub use models::config::ExtractorConfig;
pub use models::order::{OrderDraft, OrderDraftRaw, ParsedOrder};
pub use order::rules::money::normalize_amount;
pub use order::{extract_order, OrderParser, Policy};
