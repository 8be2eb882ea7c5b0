use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployerError {
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    #[error("API returned error {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Long-running operation ended with status {status}: {body}")]
    OperationFailed { status: String, body: String },

    #[error("Response is missing field '{0}'")]
    MissingField(String),

    #[error("No subscriptions are available for this account")]
    NoSubscriptions,

    #[error("Invalid password options: {0}")]
    InvalidPasswordOptions(String),
}
