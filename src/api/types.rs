use serde::Serialize;

use crate::db::{Opportunity, Role, User};

/// Response envelope. `message`/`category` carry the flash-style notification
/// shown once by the view layer after the operation; `redirect` is the page the
/// view should navigate to next.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
            category: None,
            redirect: None,
        }
    }

    /// Success with a "success"-severity flash message.
    pub fn flash(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: Some(message.into()),
            category: Some("success"),
            redirect: None,
        }
    }

    #[must_use]
    pub fn with_redirect(mut self, to: impl Into<String>) -> Self {
        self.redirect = Some(to.into());
        self
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::error_with_category(message, "danger")
    }

    pub fn error_with_category(message: impl Into<String>, category: &'static str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            message: None,
            category: Some(category),
            redirect: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OpportunityDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub business_unit: String,
    pub submitted_by: i32,
    pub date_submitted: String,
    pub predicted_benefits: String,
    pub business_criticality: String,
    pub status: String,
    pub value_score: Option<i32>,
    pub effort_score: Option<i32>,
}

impl From<Opportunity> for OpportunityDto {
    fn from(record: Opportunity) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            business_unit: record.business_unit,
            submitted_by: record.submitted_by,
            date_submitted: record.date_submitted,
            predicted_benefits: record.predicted_benefits,
            business_criticality: record.business_criticality,
            status: record.status,
            value_score: record.value_score,
            effort_score: record.effort_score,
        }
    }
}

/// Payload for the public landing view.
#[derive(Debug, Serialize)]
pub struct LandingDto {
    pub authenticated: bool,
    pub user: Option<UserDto>,
}
