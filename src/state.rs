use crate::auth::token::TokenSigner;
use crate::config::Config;
use crate::store::{Collection, Store};

/// Process-wide context: the two collection handles and the token signer.
///
/// Constructed once at startup and cloned into every worker; handlers and
/// middleware receive it through `web::Data` rather than reaching for
/// globals or the environment.
#[derive(Clone)]
pub struct AppState {
    pub users: Collection,
    pub tasks: Collection,
    pub tokens: TokenSigner,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let store = Store::new();
        Self {
            users: store.collection("users"),
            tasks: store.collection("task"),
            tokens: TokenSigner::new(config.access_token_secret.clone()),
        }
    }
}
