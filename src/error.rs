use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum VerifyError {
    /// Blank explanation, no claims derivable.
    #[error("No explanation provided")]
    EmptyInput,

    #[error("Invalid vocabulary pattern: {0}")]
    Vocabulary(#[from] regex::Error),
}

pub type VerifyResult<T> = Result<T, VerifyError>;
