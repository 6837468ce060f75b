use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use personapath_auth::TokenVerifier;
use personapath_bedrock::ReportGenerator;
use personapath_session::Session;
use personapath_storage::ReportStore;

/// Shared application state, injected into all route handlers via Axum state.
///
/// Lock order is `sessions` then `store`; never the reverse.
#[derive(Clone)]
pub struct AppState {
    /// One session per identity subject.
    pub sessions: Arc<Mutex<HashMap<String, Session>>>,
    pub store: Arc<Mutex<ReportStore>>,
    pub generator: ReportGenerator,
    pub verifier: TokenVerifier,
}

impl AppState {
    pub fn new(store: ReportStore, generator: ReportGenerator, verifier: TokenVerifier) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            store: Arc::new(Mutex::new(store)),
            generator,
            verifier,
        }
    }
}
