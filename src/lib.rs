//! # deepdoc-lm
//!
//! Language model services for layout-annotated document pages. Words of a page are mapped to
//! LayoutLM features, passed through a token or sequence classifier, and the predictions are
//! written back onto the page's word annotations or summary.
#![forbid(unsafe_code)]

/// Page datapoints and annotations
pub mod datapoint;

/// Category names
pub mod settings;

/// Tokenizers
pub mod tokenizer;

/// Feature mapping
pub mod mapper;

/// Models
pub mod models;

/// Pipelines
pub mod pipelines;

/// Datasets
pub mod datasets;

/// Utilities
pub mod utils;

/// CLI indexes and utilities
pub mod cli;

/// Error macros
#[macro_use]
extern crate anyhow;
