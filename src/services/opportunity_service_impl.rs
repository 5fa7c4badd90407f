//! `SeaORM` implementation of the `OpportunityService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::constants::limits;
use crate::db::{NewOpportunity, Opportunity, OpportunityChanges, Store, User};
use crate::services::opportunity_service::{
    CreateOpportunityInput, EditOpportunityInput, OpportunityError, OpportunityService,
};

pub struct SeaOrmOpportunityService {
    store: Store,
}

impl SeaOrmOpportunityService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

/// The five always-required text fields, already trimmed.
struct CoreFields {
    title: String,
    description: String,
    business_unit: String,
    predicted_benefits: String,
    business_criticality: String,
}

impl CoreFields {
    fn validate(&self, errors: &mut Vec<String>) {
        if self.title.is_empty() {
            errors.push("Title is required.".to_string());
        } else if self.title.chars().count() > limits::TITLE_MAX_LEN {
            errors.push(format!(
                "Title must be {} characters or less.",
                limits::TITLE_MAX_LEN
            ));
        }
        if self.description.is_empty() {
            errors.push("Description is required.".to_string());
        }
        if self.business_unit.is_empty() {
            errors.push("Business Unit is required.".to_string());
        } else if self.business_unit.chars().count() > limits::BUSINESS_UNIT_MAX_LEN {
            errors.push(format!(
                "Business Unit must be {} characters or less.",
                limits::BUSINESS_UNIT_MAX_LEN
            ));
        }
        if self.predicted_benefits.is_empty() {
            errors.push("Predicted benefits are required.".to_string());
        }
        if self.business_criticality.is_empty() {
            errors.push("Business criticality is required.".to_string());
        }
    }
}

/// Parses an admin-entered score. Empty text means "not provided"; anything
/// else must be an integer in [1,100] or a validation message accumulates.
fn parse_score(raw: &str, label: &str, errors: &mut Vec<String>) -> Option<i32> {
    if raw.is_empty() {
        return None;
    }

    match raw.parse::<i32>() {
        Ok(value) if (limits::SCORE_MIN..=limits::SCORE_MAX).contains(&value) => Some(value),
        Ok(_) => {
            errors.push(format!(
                "{label} must be between {} and {}.",
                limits::SCORE_MIN,
                limits::SCORE_MAX
            ));
            None
        }
        Err(_) => {
            errors.push(format!("{label} must be an integer."));
            None
        }
    }
}

#[async_trait]
impl OpportunityService for SeaOrmOpportunityService {
    async fn list(&self) -> Result<Vec<Opportunity>, OpportunityError> {
        Ok(self.store.list_opportunities().await?)
    }

    async fn get(&self, id: i32) -> Result<Opportunity, OpportunityError> {
        self.store
            .get_opportunity(id)
            .await?
            .ok_or(OpportunityError::NotFound)
    }

    async fn create(
        &self,
        input: CreateOpportunityInput,
        acting_user: &User,
    ) -> Result<Opportunity, OpportunityError> {
        let fields = CoreFields {
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            business_unit: input.business_unit.trim().to_string(),
            predicted_benefits: input.predicted_benefits.trim().to_string(),
            business_criticality: input.business_criticality.trim().to_string(),
        };

        let mut errors = Vec::new();
        fields.validate(&mut errors);
        if !errors.is_empty() {
            return Err(OpportunityError::Validation(errors));
        }

        if self
            .store
            .opportunity_title_exists(&fields.title, None)
            .await?
        {
            return Err(OpportunityError::DuplicateTitle);
        }

        let created = self
            .store
            .insert_opportunity(NewOpportunity {
                title: fields.title,
                description: fields.description,
                business_unit: fields.business_unit,
                predicted_benefits: fields.predicted_benefits,
                business_criticality: fields.business_criticality,
                submitted_by: acting_user.id,
            })
            .await?;

        info!(
            "Opportunity {} '{}' created by user {}",
            created.id, created.title, acting_user.id
        );
        Ok(created)
    }

    async fn edit(
        &self,
        id: i32,
        input: EditOpportunityInput,
        acting_user: &User,
    ) -> Result<Opportunity, OpportunityError> {
        let existing = self
            .store
            .get_opportunity(id)
            .await?
            .ok_or(OpportunityError::NotFound)?;

        let is_owner = existing.submitted_by == acting_user.id;
        if !(acting_user.role.is_admin() || is_owner) {
            return Err(OpportunityError::Forbidden);
        }

        let fields = CoreFields {
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            business_unit: input.business_unit.trim().to_string(),
            predicted_benefits: input.predicted_benefits.trim().to_string(),
            business_criticality: input.business_criticality.trim().to_string(),
        };

        let mut errors = Vec::new();
        fields.validate(&mut errors);

        if self
            .store
            .opportunity_title_exists(&fields.title, Some(id))
            .await?
        {
            return Err(OpportunityError::DuplicateTitle);
        }

        // Status and scores are admin-only; other users' submissions of these
        // fields are ignored without error.
        let (status, value_score, effort_score) = if acting_user.role.is_admin() {
            let status = input.status.trim();
            let status = (!status.is_empty()).then(|| status.to_string());
            let value_score = parse_score(input.value_score.trim(), "Value score", &mut errors);
            let effort_score = parse_score(input.effort_score.trim(), "Effort score", &mut errors);
            (status, value_score, effort_score)
        } else {
            (None, None, None)
        };

        if !errors.is_empty() {
            return Err(OpportunityError::Validation(errors));
        }

        let updated = self
            .store
            .update_opportunity(
                id,
                OpportunityChanges {
                    title: fields.title,
                    description: fields.description,
                    business_unit: fields.business_unit,
                    predicted_benefits: fields.predicted_benefits,
                    business_criticality: fields.business_criticality,
                    status,
                    value_score,
                    effort_score,
                },
            )
            .await?;

        if !updated {
            return Err(OpportunityError::NotFound);
        }

        info!("Opportunity {id} updated by user {}", acting_user.id);
        self.get(id).await
    }

    async fn delete(&self, id: i32, acting_user: &User) -> Result<(), OpportunityError> {
        if !acting_user.role.is_admin() {
            return Err(OpportunityError::Forbidden);
        }

        let deleted = self.store.delete_opportunity(id).await?;
        if !deleted {
            return Err(OpportunityError::NotFound);
        }

        info!("Opportunity {id} deleted by admin {}", acting_user.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score_accepts_range() {
        let mut errors = Vec::new();
        assert_eq!(parse_score("1", "Value score", &mut errors), Some(1));
        assert_eq!(parse_score("50", "Value score", &mut errors), Some(50));
        assert_eq!(parse_score("100", "Value score", &mut errors), Some(100));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_parse_score_empty_means_unset() {
        let mut errors = Vec::new();
        assert_eq!(parse_score("", "Value score", &mut errors), None);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_parse_score_out_of_range() {
        let mut errors = Vec::new();
        assert_eq!(parse_score("101", "Value score", &mut errors), None);
        assert_eq!(parse_score("0", "Effort score", &mut errors), None);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("between 1 and 100"));
    }

    #[test]
    fn test_parse_score_non_integer() {
        let mut errors = Vec::new();
        assert_eq!(parse_score("abc", "Value score", &mut errors), None);
        assert_eq!(errors, vec!["Value score must be an integer.".to_string()]);
    }

    #[test]
    fn test_core_fields_accumulate_errors() {
        let fields = CoreFields {
            title: String::new(),
            description: String::new(),
            business_unit: "x".repeat(21),
            predicted_benefits: "Fewer lost parcels".to_string(),
            business_criticality: String::new(),
        };

        let mut errors = Vec::new();
        fields.validate(&mut errors);
        assert_eq!(errors.len(), 4);
    }
}
