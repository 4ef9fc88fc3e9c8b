use thiserror::Error;

#[derive(Error, Debug)]
/// Errors raised by move parsing, board play and game refereeing.
///
/// The `Display` text of [`Error::InvalidMove`] and [`Error::ExternalPlayer`]
/// is the authoritative exception message the referee records against the
/// offending player.
pub enum Error {
    #[error("invalid position")]
    InvalidPosition,
    #[error("invalid word: {0}")]
    InvalidWord(String),
    #[error("{0}")]
    InvalidMove(String),
    #[error("{0}")]
    ExternalPlayer(String),
    #[error("wordfile {0} could not be read")]
    WordfileRead(String),
    #[error("variant file {0} could not be read")]
    VariantRead(String),
    #[error("variant could not be parsed: {0}")]
    VariantParse(#[from] serde_json::Error),
}
