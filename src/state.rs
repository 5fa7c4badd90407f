use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    IdentityService, OpportunityService, SeaOrmIdentityService, SeaOrmOpportunityService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub identity_service: Arc<dyn IdentityService>,

    pub opportunity_service: Arc<dyn OpportunityService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let identity_service: Arc<dyn IdentityService> = Arc::new(SeaOrmIdentityService::new(
            store.clone(),
            config.security.clone(),
        ));

        // Deployment bootstrap: a well-known admin account must always exist.
        identity_service
            .ensure_default_admin(&config.bootstrap)
            .await?;

        let opportunity_service: Arc<dyn OpportunityService> =
            Arc::new(SeaOrmOpportunityService::new(store.clone()));

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            identity_service,
            opportunity_service,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
