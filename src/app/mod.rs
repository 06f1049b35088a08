pub mod serve;

// re-export
pub use serve::serve;

use std::{net::SocketAddr, sync::Arc};

use derive_more::Deref;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    config::{AppConfig, KitCredentials},
    KitClient, Result,
};

// ###################################
// ->  Structs
// ###################################
pub struct App {
    pub app_state: AppState,
    pub listener: TcpListener,
}
impl App {
    pub fn new(app_state: AppState, listener: TcpListener) -> Self {
        App {
            app_state,
            listener,
        }
    }

    pub async fn build_from_config(config: &AppConfig) -> Result<Self> {
        let kit_client = KitClient::new(&config.kit_config.url, config.kit_config.timeout())?;

        // Missing credentials are reported per request, not at startup.
        let kit_credentials = KitCredentials::from_env();
        if kit_credentials.is_none() {
            warn!(
                "{:<20} - Kit credentials not found in the environment, \
                 subscribe requests will fail",
                "build_from_config"
            );
        }

        let app_state = AppState::new(kit_client, kit_credentials);

        let addr = SocketAddr::from((config.net_config.host, config.net_config.app_port));
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        info!("{:<20} - {}", "Listening on:", addr);

        let app = App::new(app_state, listener);
        Ok(app)
    }
}

pub struct InternalState {
    pub kit_client: KitClient,
    pub kit_credentials: Option<KitCredentials>,
}

/// Application state containing all global data.
/// It implements `Deref` to easily access the fields on `InternalState`
/// Uses an `Arc` so it can be cloned around.
#[derive(Clone, Deref)]
pub struct AppState(Arc<InternalState>);

impl AppState {
    pub fn new(kit_client: KitClient, kit_credentials: Option<KitCredentials>) -> Self {
        AppState(Arc::new(InternalState {
            kit_client,
            kit_credentials,
        }))
    }
}
