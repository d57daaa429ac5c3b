/*
 * Responsibility
 * - middleware の公開インターフェース
 * - access_guard: /vip, /admin の cookie チェック → /login へ redirect
 * - http: request id / trace / body limit / timeout
 */
pub mod access_guard;
pub mod http;
