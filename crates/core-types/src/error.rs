use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unrecognized zodiac sign: {0}")]
    UnknownSign(String),

    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),
}
