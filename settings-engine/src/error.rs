use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Settings query failed: {0}")]
    QueryFailed(#[from] sqlx::Error),
}

pub type SettingsResult<T> = Result<T, SettingsError>;
