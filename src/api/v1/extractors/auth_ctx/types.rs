/*
 * Responsibility
 * - Handler から見える「セキュリティコンテキスト」の型
 * - bearer gate が request extensions に格納し、handler / extractor はこの型だけを読む
 *
 * Notes
 * - JWT の検証ロジックは services 側の責務
 * - ここは「型（契約）」として固定化する
 */
use std::collections::BTreeSet;
use std::net::SocketAddr;

/// Metadata captured from the request that carried the token.
///
/// The service keeps no sessions; the request id is the closest correlation handle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDetails {
    pub remote_addr: Option<SocketAddr>,
    pub request_id: Option<String>,
}

/// An identity established from a valid bearer token.
///
/// - `principal` は token の `sub` (username)
/// - `authorities` はこのフローでは常に空
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub principal: String,
    pub authorities: BTreeSet<String>,
    pub details: RequestDetails,
}

impl AuthenticatedIdentity {
    pub fn new(principal: impl Into<String>, details: RequestDetails) -> Self {
        Self {
            principal: principal.into(),
            authorities: BTreeSet::new(),
            details,
        }
    }
}

/// Per-request security context.
///
/// Lives in the request extensions for exactly one request. Downstream stages read it to
/// decide whether to serve or reject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityContext {
    authentication: Option<AuthenticatedIdentity>,
}

impl SecurityContext {
    pub fn unauthenticated() -> Self {
        Self::default()
    }

    pub fn set_authentication(&mut self, identity: AuthenticatedIdentity) {
        self.authentication = Some(identity);
    }

    pub fn authentication(&self) -> Option<&AuthenticatedIdentity> {
        self.authentication.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authentication.is_some()
    }
}
