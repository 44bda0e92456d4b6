pub mod bearer_gate;
pub mod factory;
pub mod jwt_util;
pub mod token;

pub use bearer_gate::{BearerGate, GateDecision, UnauthenticatedReason};
pub use factory::build_bearer_gate;
pub use jwt_util::JwtUtil;
pub use token::{ClaimsExtractor, TokenServiceError, TokenValidator};
