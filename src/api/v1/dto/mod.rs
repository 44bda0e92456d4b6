pub mod identity;
pub mod login_request;
