//! Sender enrollment
//!
//! Registers an identity in the ledger with the deployment's default
//! balance. The enabled flag is derived from that initial balance once,
//! here, and never recomputed afterwards.

use std::sync::Arc;

use tracing::info;

use crate::error::ApiError;
use crate::services::LedgerStore;
use crate::{validate_field, validate_required};

/// Enroll an address for send access.
///
/// Duplicate enrollment surfaces the store's uniqueness violation as a
/// conflict; there is no separate existence lookup.
pub async fn enroll(
    ledger: &Arc<dyn LedgerStore>,
    address: &str,
    default_balance: i64,
) -> Result<(), ApiError> {
    validate_required!(address, "No address");

    let enabled = default_balance > 0;
    match ledger.create_account(address, default_balance, enabled).await {
        Ok(()) => {
            info!(
                address = %address,
                balance = default_balance,
                enabled = enabled,
                "Send access granted"
            );
            Ok(())
        }
        Err(e) if e.is_unique_violation() => Err(ApiError::conflict("Already requested")),
        Err(e) => Err(ApiError::from(e)),
    }
}
