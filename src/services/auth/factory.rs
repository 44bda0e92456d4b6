//! Factory: build the `BearerGate` (and its `JwtUtil` collaborator) from application `Config`.

use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{BearerGate, JwtUtil, TokenServiceError};

pub fn build_bearer_gate(config: &Config) -> Result<Arc<BearerGate>, TokenServiceError> {
    let jwt = Arc::new(JwtUtil::new(
        &config.verification_key,
        config.auth_issuer.as_deref(),
        config.auth_audience.as_deref(),
        config.access_token_leeway_seconds,
    )?);

    Ok(Arc::new(BearerGate::new(jwt.clone(), jwt)))
}
