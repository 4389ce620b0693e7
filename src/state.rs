use std::path::PathBuf;
use std::sync::Arc;

use crate::gateway::GatewayClient;

#[derive(Clone)]
pub struct AppState {
    /// `None` when the gateway url/token are not configured.
    pub gateway: Option<Arc<GatewayClient>>,
    pub static_dir: PathBuf,
}
