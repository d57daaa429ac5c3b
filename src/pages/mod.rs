/*
 * Responsibility
 * - host 側のページ (health / login / その他) の公開ポイント
 * - 実際のページ描画は外部の責務。ここは guard を通した先の stand-in
 */
pub mod handlers;
mod routes;

pub use routes::routes;
