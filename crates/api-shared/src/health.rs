use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Simple health service usable by any API surface.
#[derive(Clone)]
pub struct HealthService;

impl HealthService {
    /// Reports the service as healthy.
    ///
    /// Used by load-balancer probes; there is no deeper dependency to
    /// check because the store lives in-process.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "clinica is alive".into(),
        }
    }
}
