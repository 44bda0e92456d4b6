/*
 * Responsibility
 * - ログイン payload の request DTO (`{"username": ..., "password": ...}`)
 * - 検証はしない（資格情報の照合は外部の認証処理の責務）
 */
use std::fmt;

use serde::Deserialize;

#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the password
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_login_payload() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"username":"alice","password":"pw"}"#).unwrap();
        assert_eq!(req, LoginRequest::new("alice", "pw"));
    }

    #[test]
    fn fields_are_plain_storage() {
        let mut req = LoginRequest::default();
        req.username = "bob".into();
        req.password = String::new();

        assert_eq!(req.username, "bob");
        assert!(req.password.is_empty());
    }

    #[test]
    fn debug_hides_password() {
        let req = LoginRequest::new("alice", "hunter2");
        let printed = format!("{req:?}");
        assert!(printed.contains("alice"));
        assert!(!printed.contains("hunter2"));
    }
}
