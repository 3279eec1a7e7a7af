#![warn(clippy::all, rust_2018_idioms)]

pub mod cli;
pub mod config;
pub mod dictionary;
pub mod driver;
pub mod inventory;
pub mod raw_data;
pub mod report;
mod rewrite;
pub mod runtime;
pub mod shape;
pub mod sounds;
pub mod syllabify;
pub mod word;

use thiserror::Error;

pub use config::{OutputTarget, Settings};
pub use dictionary::{CsvDictionary, Dictionary};
pub use driver::{build_table, run};
pub use report::{ReportRow, ReportTable, TABLE_HEADER};
pub use runtime::PhonologyRuntime;
pub use shape::{ShapeBucket, ShapeClassifier};
pub use syllabify::{OnsetSyllabifier, Syllabifier};
pub use word::{Phone, PhoneClass, Stress, Syllable};

#[derive(Debug, Error)]
pub enum SyllTabError {
    #[error("Unable to start phonology runtime: {0}")]
    RuntimeUnavailable(String),

    #[error("Failed to parse ({0})")]
    GenericParseError(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SyllTabResult<T> = Result<T, SyllTabError>;

