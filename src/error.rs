use thiserror::Error;

#[derive(Debug, Error)]
pub enum DistributionError {
    #[error("incompatible shapes for broadcasting: {left:?} and {right:?}")]
    Shape { left: Vec<i64>, right: Vec<i64> },

    #[error("invalid distribution arguments: `{name}` = {value}")]
    Parameter { name: &'static str, value: String },

    #[error("invalid values for {family}: {value}")]
    Support { family: &'static str, value: String },

    #[error("standard gamma sampler did not accept every element within {rounds} rounds")]
    RejectionLimit { rounds: usize },

    #[error("missing distribution parameter `{0}`")]
    MissingParameter(&'static str),

    #[error("unexpected distribution parameter `{0}`")]
    UnexpectedParameter(String),

    #[error(transparent)]
    Tch(#[from] tch::TchError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl DistributionError {
    pub(crate) fn parameter(name: &'static str, value: impl ToString) -> Self {
        DistributionError::Parameter {
            name,
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DistributionError>;
