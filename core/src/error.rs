use thiserror::Error;

/// Fatal and recoverable failures of the report pipeline.
///
/// `EmptyInput` is the only variant callers are expected to recover from
/// (log a notice, skip the report). Everything else fails the whole batch:
/// one production log describes exactly one user, and a malformed line most
/// likely means the export itself is corrupted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("no usable lines in production log")]
    EmptyInput,

    #[error("multiple user ids found in one production log: {0:?}")]
    MultipleUids(Vec<String>),

    #[error("unrecognised date format: '{0}'")]
    InvalidDateFormat(String),

    #[error("malformed production line: '{0}'")]
    MalformedLine(String),
}
