use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::constants::status;
use crate::entities::opportunities;

/// Field set for inserting a new opportunity. Status and timestamp are
/// assigned by the repository, scores start unset.
pub struct NewOpportunity {
    pub title: String,
    pub description: String,
    pub business_unit: String,
    pub predicted_benefits: String,
    pub business_criticality: String,
    pub submitted_by: i32,
}

/// Full replacement of the mutable fields of an opportunity. `status` and the
/// scores are `None` when the caller leaves them untouched.
pub struct OpportunityChanges {
    pub title: String,
    pub description: String,
    pub business_unit: String,
    pub predicted_benefits: String,
    pub business_criticality: String,
    pub status: Option<String>,
    pub value_score: Option<i32>,
    pub effort_score: Option<i32>,
}

pub struct OpportunityRepository {
    conn: DatabaseConnection,
}

impl OpportunityRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All opportunities in insertion (id) order.
    pub async fn list(&self) -> Result<Vec<opportunities::Model>> {
        let records = opportunities::Entity::find()
            .order_by_asc(opportunities::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list opportunities")?;

        Ok(records)
    }

    pub async fn get(&self, id: i32) -> Result<Option<opportunities::Model>> {
        let record = opportunities::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query opportunity by ID")?;

        Ok(record)
    }

    /// Whether another opportunity already uses this title. `exclude_id`
    /// skips the record being edited.
    pub async fn title_exists(&self, title: &str, exclude_id: Option<i32>) -> Result<bool> {
        let mut query =
            opportunities::Entity::find().filter(opportunities::Column::Title.eq(title));

        if let Some(id) = exclude_id {
            query = query.filter(opportunities::Column::Id.ne(id));
        }

        let existing = query
            .one(&self.conn)
            .await
            .context("Failed to check title uniqueness")?;

        Ok(existing.is_some())
    }

    pub async fn insert(&self, new: NewOpportunity) -> Result<opportunities::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let model = opportunities::ActiveModel {
            title: Set(new.title),
            description: Set(new.description),
            business_unit: Set(new.business_unit),
            predicted_benefits: Set(new.predicted_benefits),
            business_criticality: Set(new.business_criticality),
            submitted_by: Set(new.submitted_by),
            date_submitted: Set(now),
            status: Set(status::NEW.to_string()),
            ..Default::default()
        };

        let inserted = model
            .insert(&self.conn)
            .await
            .context("Failed to insert opportunity")?;

        Ok(inserted)
    }

    /// Apply core fields and any admin-only fields in one transaction.
    pub async fn update(&self, id: i32, changes: OpportunityChanges) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let Some(record) = opportunities::Entity::find_by_id(id).one(&txn).await? else {
            txn.rollback().await?;
            return Ok(false);
        };

        let mut active: opportunities::ActiveModel = record.into();
        active.title = Set(changes.title);
        active.description = Set(changes.description);
        active.business_unit = Set(changes.business_unit);
        active.predicted_benefits = Set(changes.predicted_benefits);
        active.business_criticality = Set(changes.business_criticality);

        if let Some(status) = changes.status {
            active.status = Set(status);
        }
        if let Some(score) = changes.value_score {
            active.value_score = Set(Some(score));
        }
        if let Some(score) = changes.effort_score {
            active.effort_score = Set(Some(score));
        }

        active
            .update(&txn)
            .await
            .context("Failed to update opportunity")?;

        txn.commit().await?;
        Ok(true)
    }

    /// Returns false when the id does not exist.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = opportunities::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete opportunity")?;

        Ok(result.rows_affected > 0)
    }
}
