pub mod access;
pub mod health;
pub mod send;
pub mod sendbox;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Plain acknowledgement body shared by the mutation endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"status": "ok"}))]
pub struct StatusResponse {
    /// Always "ok" on success
    #[schema(example = "ok")]
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
