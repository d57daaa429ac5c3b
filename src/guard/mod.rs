/*
 * Responsibility
 * - route guard の公開インターフェース (re-export)
 * - HTTP / axum に依存しない純粋な判定ロジック
 *   - middleware 側が GuardRequest を組み立て、ここは Decision を返すだけ
 */
mod credentials;
mod policy;

pub use credentials::{ACCESS_TOKEN_COOKIE, Credentials};
pub use policy::{AccessPolicy, Decision, GuardRequest, LOGIN_PATH, PROTECTED_PREFIXES};

/// Decide a request against the built-in policy.
pub fn evaluate(request: &GuardRequest) -> Decision {
    AccessPolicy::default().decide(request)
}
