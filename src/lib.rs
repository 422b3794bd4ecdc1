//! allyscan core library.
//!
//! This crate exposes the accessibility scan-result model: issue
//! classification, aggregation into page- and scan-level statistics, and the
//! fixture scanner that stands in for a real engine.
//!
//! High-level modules:
//! - `aggregate`: Totals and compliance score over page results.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `error`: Error enums for every fallible operation.
//! - `input`: Loading page results from JSON.
//! - `models`: Issue, page and scan result structs plus standards.
//! - `output`: Human/JSON printers.
//! - `rules`: Known rule codes and remediation lookup.
//! - `scanner`: Scanner trait and fixture-backed implementation.
//! - `state`: Scan session state machine.
//! - `validate`: Target URL validation.
pub mod aggregate;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod output;
pub mod rules;
pub mod scanner;
pub mod state;
pub mod validate;
