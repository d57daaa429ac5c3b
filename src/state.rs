/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - guard policy と redirect 用の public origin
 * - Clone 前提で持つ (内部は Arc で cheap)
 */
use std::sync::Arc;

use url::Url;

use crate::guard::AccessPolicy;

#[derive(Clone, Debug)]
pub struct AppState {
    pub policy: Arc<AccessPolicy>,
    pub public_origin: Option<Arc<Url>>,
}

impl AppState {
    pub fn new(policy: AccessPolicy, public_origin: Option<Url>) -> Self {
        Self {
            policy: Arc::new(policy),
            public_origin: public_origin.map(Arc::new),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AccessPolicy::default(), None)
    }
}
