//! perpetuum-comparer - structural and content comparison of tabular datasets
//!
//! Two datasets sharing a line identifier column are compared in three steps:
//! their schemas ([`compare::compare_structure`]), the values of the rows they
//! share ([`compare::compare_content`]), and finally the report tables built
//! from the findings ([`compare::build_reports`]). [`Comparer`] runs the first
//! two and returns a [`ComparisonResult`].

pub mod compare;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod model;
pub mod output;
pub mod parser;

pub use compare::{Comparer, ComparisonResult};
pub use config::Config;
pub use error::{ComparerError, Result};
pub use logging::LogSink;
pub use model::Dataset;
