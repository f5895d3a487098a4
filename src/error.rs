//! Command-line Error Types

use derive_more::{Display, Error};

/// A command-line error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for command-line operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[display("could not load configuration")]
    Config,
    #[display("could not read input")]
    Input,
    #[display("input is not valid UTF-8")]
    InvalidEncoding,
    #[display("could not truncate input")]
    Truncate,
    #[display("could not write output")]
    Output,
}
