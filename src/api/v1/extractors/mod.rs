pub mod auth_ctx;

pub use auth_ctx::{
    Authenticated, AuthenticatedIdentity, CurrentContext, RequestDetails, SecurityContext,
};
