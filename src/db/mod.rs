use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;

pub mod migrator;
pub mod repositories;

pub use crate::entities::opportunities::Model as Opportunity;
pub use repositories::opportunity::{NewOpportunity, OpportunityChanges};
pub use repositories::user::{Role, User};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // An in-memory SQLite database only lives as long as its connection,
        // so the pool must be pinned to a single one.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn opportunity_repo(&self) -> repositories::opportunity::OpportunityRepository {
        repositories::opportunity::OpportunityRepository::new(self.conn.clone())
    }

    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
        security: &SecurityConfig,
    ) -> Result<User> {
        self.user_repo()
            .create(name, email, password, role, security)
            .await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn get_user_by_name(&self, name: &str) -> Result<Option<User>> {
        self.user_repo().get_by_name(name).await
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn verify_user_password(&self, email: &str, password: &str) -> Result<bool> {
        self.user_repo().verify_password(email, password).await
    }

    pub async fn list_opportunities(&self) -> Result<Vec<Opportunity>> {
        self.opportunity_repo().list().await
    }

    pub async fn get_opportunity(&self, id: i32) -> Result<Option<Opportunity>> {
        self.opportunity_repo().get(id).await
    }

    pub async fn opportunity_title_exists(
        &self,
        title: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool> {
        self.opportunity_repo()
            .title_exists(title, exclude_id)
            .await
    }

    pub async fn insert_opportunity(&self, new: NewOpportunity) -> Result<Opportunity> {
        self.opportunity_repo().insert(new).await
    }

    pub async fn update_opportunity(&self, id: i32, changes: OpportunityChanges) -> Result<bool> {
        self.opportunity_repo().update(id, changes).await
    }

    pub async fn delete_opportunity(&self, id: i32) -> Result<bool> {
        self.opportunity_repo().delete(id).await
    }
}
