use std::time::Duration;

/// A malformed page fragment. Never fatal to the run: the current record is
/// skipped, a diagnostic is logged, and scraping continues with the next link.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("line does not match the expected shape: {0:?}")]
    UnexpectedLineShape(String),
    #[error("unknown month abbreviation: {0:?}")]
    UnknownMonthAbbreviation(String),
    #[error("slot row appeared before any section row")]
    SlotBeforeSection,
    #[error("malformed section row: {0}")]
    BadSectionRow(String),
    #[error("row has no column {index} (width {width})")]
    TruncatedRow { index: usize, width: usize },
    #[error("timed out after {0:?} waiting for the course detail view")]
    DetailTimeout(Duration),
}

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("modal kept reappearing after {attempts} attempts")]
    RetryExhausted { attempts: u32 },
    #[error("output stream error")]
    Stream(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Browser(#[from] anyhow::Error),
}
