mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, FcmConfig};
pub use repos::{DeleteResult, INotificationLogRepo, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::info;

#[derive(Clone)]
pub struct GemschiContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub push: Arc<dyn IPushSender>,
}

impl GemschiContext {
    /// Context backed by in-memory repositories that only logs pushes
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            push: Arc::new(LogPushSender),
        }
    }

    async fn create(config: Config) -> Self {
        let repos = match &config.database_url {
            Some(connection_string) => Repos::create_postgres(connection_string)
                .await
                .unwrap_or_else(|e| panic!("Postgres credentials must be valid: {:?}", e)),
            None => {
                info!("DATABASE_URL not set, using in-memory repositories.");
                Repos::create_inmemory()
            }
        };
        let push: Arc<dyn IPushSender> = match &config.fcm {
            Some(fcm) => Arc::new(
                FcmPushSender::new(fcm)
                    .unwrap_or_else(|e| panic!("Unable to build the FCM http client: {:?}", e)),
            ),
            None => {
                info!("FCM credentials not set, push notifications are only logged.");
                Arc::new(LogPushSender)
            }
        };

        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            push,
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> GemschiContext {
    GemschiContext::create(Config::new()).await
}

