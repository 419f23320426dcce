use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The provider answered with a non-success status
    #[error("Provider rejected message: status=[{status}] body=[{body}]")]
    Rejected { status: u16, body: String },

    /// The provider could not be reached at all
    #[error("Provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type DeliveryResult<T> = Result<T, DeliveryError>;
