//! Demo-data loader: a handful of users and opportunities for evaluating the
//! portal. Safe to run repeatedly; existing records are skipped.

use anyhow::Result;
use tracing::info;

use crate::db::{NewOpportunity, OpportunityChanges, Role, Store};
use crate::state::SharedState;

const ADMIN_DEMO_PASSWORD: &str = "Admin!";
const REGULAR_DEMO_PASSWORD: &str = "Password!";

struct DemoUser {
    name: &'static str,
    email: &'static str,
    role: Role,
}

struct DemoOpportunity {
    title: &'static str,
    description: &'static str,
    business_unit: &'static str,
    predicted_benefits: &'static str,
    business_criticality: &'static str,
    status: &'static str,
    value_score: Option<i32>,
    effort_score: Option<i32>,
    submitter_email: &'static str,
}

const DEMO_USERS: &[DemoUser] = &[
    DemoUser {
        name: "Scott McLaughlin",
        email: "scott.mclaughlin@royalmail.com",
        role: Role::Admin,
    },
    DemoUser {
        name: "Promise Akwaowo",
        email: "promise.akwaowo@royalmail.com",
        role: Role::Admin,
    },
    DemoUser {
        name: "Samuel May",
        email: "samuel.may@royalmail.com",
        role: Role::Regular,
    },
    DemoUser {
        name: "Priya Udhayabhanu",
        email: "priya.udhayabhanu@royalmail.com",
        role: Role::Regular,
    },
    DemoUser {
        name: "Daniel Cross",
        email: "daniel.cross@royalmail.com",
        role: Role::Regular,
    },
    DemoUser {
        name: "Agata Lee",
        email: "agata.lee@royalmail.com",
        role: Role::Regular,
    },
];

const DEMO_OPPORTUNITIES: &[DemoOpportunity] = &[
    DemoOpportunity {
        title: "Automated Linehaul Allocation",
        description: "Automate allocation of linehaul routes based on volumetrics and depot capacity.",
        business_unit: "Logistics",
        predicted_benefits: "Reduced manual planning and improved delivery reliability.",
        business_criticality: "High",
        status: "Qualified",
        value_score: Some(82),
        effort_score: Some(55),
        submitter_email: "scott.mclaughlin@royalmail.com",
    },
    DemoOpportunity {
        title: "OCR-Based Address Validation",
        description: "Use OCR and machine learning to validate handwritten addresses before sorting.",
        business_unit: "Processing",
        predicted_benefits: "Higher sorting accuracy and reduced manual keying effort.",
        business_criticality: "Critical",
        status: "In Discovery",
        value_score: Some(90),
        effort_score: Some(70),
        submitter_email: "promise.akwaowo@royalmail.com",
    },
    DemoOpportunity {
        title: "Delivery Route Compliance",
        description: "Automate validation of delivery route completion against planned time windows.",
        business_unit: "Delivery Operations",
        predicted_benefits: "Increased SLA compliance and reduced manual audit effort.",
        business_criticality: "Medium",
        status: "New",
        value_score: None,
        effort_score: None,
        submitter_email: "samuel.may@royalmail.com",
    },
    DemoOpportunity {
        title: "Parcel Reconciliation",
        description: "Automate reconciliation of mismatched parcel records between depots and delivery units.",
        business_unit: "Parcels",
        predicted_benefits: "Fewer lost parcels and improved auditability.",
        business_criticality: "High",
        status: "New",
        value_score: None,
        effort_score: None,
        submitter_email: "priya.udhayabhanu@royalmail.com",
    },
    DemoOpportunity {
        title: "Customer Refund Automation",
        description: "Automate refund processing for delayed tracked items using scan data.",
        business_unit: "Customer Services",
        predicted_benefits: "Faster refunds for customers and reduced manual back-office effort.",
        business_criticality: "High",
        status: "Under Review",
        value_score: None,
        effort_score: None,
        submitter_email: "daniel.cross@royalmail.com",
    },
    DemoOpportunity {
        title: "Manifest Compliance Checker",
        description: "Validate export declarations and customs data before international dispatch.",
        business_unit: "International Mail",
        predicted_benefits: "Reduces customs delays and compliance issues.",
        business_criticality: "High",
        status: "New",
        value_score: None,
        effort_score: None,
        submitter_email: "agata.lee@royalmail.com",
    },
];

/// Runs the full seed against an initialized state (the default admin is
/// already ensured by `SharedState::new`).
pub async fn run(state: &SharedState) -> Result<()> {
    let config = state.config().await;
    let created_users = seed_users(&state.store, &config.security).await?;
    let created_opportunities = seed_opportunities(&state.store).await?;

    info!(
        "Seeding complete: {} new users, {} new opportunities",
        created_users, created_opportunities
    );
    Ok(())
}

async fn seed_users(store: &Store, security: &crate::config::SecurityConfig) -> Result<usize> {
    let mut created = 0;

    for demo in DEMO_USERS {
        if store.get_user_by_email(demo.email).await?.is_some() {
            info!("User already exists, skipping: {}", demo.email);
            continue;
        }

        let password = match demo.role {
            Role::Admin => ADMIN_DEMO_PASSWORD,
            Role::Regular => REGULAR_DEMO_PASSWORD,
        };

        store
            .create_user(demo.name, demo.email, password, demo.role, security)
            .await?;
        created += 1;
    }

    Ok(created)
}

async fn seed_opportunities(store: &Store) -> Result<usize> {
    let mut created = 0;

    for demo in DEMO_OPPORTUNITIES {
        if store.opportunity_title_exists(demo.title, None).await? {
            info!("Opportunity already exists, skipping: {}", demo.title);
            continue;
        }

        let Some(submitter) = store.get_user_by_email(demo.submitter_email).await? else {
            info!(
                "Submitter not found for {}, skipping opportunity {}",
                demo.submitter_email, demo.title
            );
            continue;
        };

        let inserted = store
            .insert_opportunity(NewOpportunity {
                title: demo.title.to_string(),
                description: demo.description.to_string(),
                business_unit: demo.business_unit.to_string(),
                predicted_benefits: demo.predicted_benefits.to_string(),
                business_criticality: demo.business_criticality.to_string(),
                submitted_by: submitter.id,
            })
            .await?;

        // Insert always starts at "New"; triaged demo records carry their
        // review state and scores in a follow-up update.
        if demo.status != crate::constants::status::NEW
            || demo.value_score.is_some()
            || demo.effort_score.is_some()
        {
            store
                .update_opportunity(
                    inserted.id,
                    OpportunityChanges {
                        title: inserted.title.clone(),
                        description: inserted.description.clone(),
                        business_unit: inserted.business_unit.clone(),
                        predicted_benefits: inserted.predicted_benefits.clone(),
                        business_criticality: inserted.business_criticality.clone(),
                        status: Some(demo.status.to_string()),
                        value_score: demo.value_score,
                        effort_score: demo.effort_score,
                    },
                )
                .await?;
        }

        created += 1;
    }

    Ok(created)
}
