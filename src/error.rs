use thiserror::Error;

/// Errors, numbered the way `solve` reports them:
///    Error 1: The facelet string is malformed (length or color counts)
///    Error 2: Not all 12 edges exist exactly once
///    Error 3: Flip error: one edge has to be flipped
///    Error 4: Not all 8 corners exist exactly once
///    Error 5: Twist error: one corner has to be twisted
///    Error 6: Parity error: two corners or two edges have to be exchanged
///    Error 7: Invalid move string
///    Error 8: No solution exists at or below the requested length
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    #[error("Invalid facelet string")]
    InvalidFacelet,
    #[error("Not all 12 edges exist exactly once")]
    MissingEdge,
    #[error("One edge has to be flipped")]
    FlipError,
    #[error("Not all 8 corners exist exactly once")]
    MissingCorner,
    #[error("One corner has to be twisted")]
    TwistError,
    #[error("Two corners or two edges have to be exchanged")]
    ParityError,
    #[error("Invalid move string")]
    InvalidMove,
    #[error("No solution exists for the given max length")]
    NoSolution,
}

impl Error {
    /// The numeric code used by the string-level API (`"Error N"`).
    pub fn code(&self) -> u8 {
        match self {
            Error::InvalidFacelet => 1,
            Error::MissingEdge => 2,
            Error::FlipError => 3,
            Error::MissingCorner => 4,
            Error::TwistError => 5,
            Error::ParityError => 6,
            Error::InvalidMove => 7,
            Error::NoSolution => 8,
        }
    }
}
