/*!
 * Security context extractor
 *
 * Responsibility:
 * - bearer gate が確立した SecurityContext を handler に提供する
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - SecurityContext / AuthenticatedIdentity / RequestDetails
 * - Authenticated / CurrentContext
 */

mod core;
mod types;

pub use self::core::{Authenticated, CurrentContext};
pub use self::types::{AuthenticatedIdentity, RequestDetails, SecurityContext};
