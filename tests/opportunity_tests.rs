use rad_portal::config::{BootstrapConfig, SecurityConfig};
use rad_portal::db::{Store, User};
use rad_portal::services::{
    CreateOpportunityInput, EditOpportunityInput, IdentityService, OpportunityError,
    OpportunityService, RegisterInput, SeaOrmIdentityService, SeaOrmOpportunityService,
};

struct TestContext {
    opportunities: SeaOrmOpportunityService,
    admin: User,
    ada: User,
    bob: User,
}

async fn setup() -> TestContext {
    let store = Store::new("sqlite::memory:")
        .await
        .expect("Failed to create test store");

    let security = SecurityConfig {
        argon2_memory_cost_kib: 1024,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
    };
    let identity = SeaOrmIdentityService::new(store.clone(), security);

    identity
        .ensure_default_admin(&BootstrapConfig::default())
        .await
        .unwrap();
    let admin = store
        .get_user_by_email("admin@example.com")
        .await
        .unwrap()
        .unwrap();

    let ada = identity
        .register(RegisterInput {
            name: "Ada".to_string(),
            email: "ada@x.com".to_string(),
            password: "pw1".to_string(),
        })
        .await
        .unwrap();

    let bob = identity
        .register(RegisterInput {
            name: "Bob".to_string(),
            email: "bob@x.com".to_string(),
            password: "pw2".to_string(),
        })
        .await
        .unwrap();

    TestContext {
        opportunities: SeaOrmOpportunityService::new(store),
        admin,
        ada,
        bob,
    }
}

fn create_input(title: &str) -> CreateOpportunityInput {
    CreateOpportunityInput {
        title: title.to_string(),
        description: "Automate the thing.".to_string(),
        business_unit: "Operations".to_string(),
        predicted_benefits: "Less manual effort.".to_string(),
        business_criticality: "High".to_string(),
    }
}

fn edit_input(title: &str) -> EditOpportunityInput {
    EditOpportunityInput {
        title: title.to_string(),
        description: "Automate the thing.".to_string(),
        business_unit: "Operations".to_string(),
        predicted_benefits: "Less manual effort.".to_string(),
        business_criticality: "High".to_string(),
        status: String::new(),
        value_score: String::new(),
        effort_score: String::new(),
    }
}

#[tokio::test]
async fn test_create_rejects_missing_fields() {
    let ctx = setup().await;

    let mut input = create_input("T1");
    input.description = "   ".to_string();
    input.business_criticality = String::new();

    let result = ctx.opportunities.create(input, &ctx.ada).await;
    let Err(OpportunityError::Validation(errors)) = result else {
        panic!("expected validation error");
    };
    assert_eq!(errors.len(), 2);

    // nothing was created
    assert!(ctx.opportunities.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_sets_defaults() {
    let ctx = setup().await;

    let created = ctx
        .opportunities
        .create(create_input("  T1  "), &ctx.ada)
        .await
        .unwrap();

    assert_eq!(created.title, "T1");
    assert_eq!(created.status, "New");
    assert_eq!(created.submitted_by, ctx.ada.id);
    assert!(created.value_score.is_none());
    assert!(created.effort_score.is_none());
    assert!(!created.date_submitted.is_empty());
}

#[tokio::test]
async fn test_create_rejects_duplicate_title() {
    let ctx = setup().await;

    ctx.opportunities
        .create(create_input("T1"), &ctx.ada)
        .await
        .unwrap();

    let result = ctx.opportunities.create(create_input("T1"), &ctx.bob).await;
    assert!(matches!(result, Err(OpportunityError::DuplicateTitle)));

    assert_eq!(ctx.opportunities.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_preserves_insertion_order() {
    let ctx = setup().await;

    ctx.opportunities
        .create(create_input("First"), &ctx.ada)
        .await
        .unwrap();
    ctx.opportunities
        .create(create_input("Second"), &ctx.bob)
        .await
        .unwrap();

    let titles: Vec<String> = ctx
        .opportunities
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|o| o.title)
        .collect();
    assert_eq!(titles, vec!["First", "Second"]);
}

#[tokio::test]
async fn test_edit_forbidden_for_non_owner() {
    let ctx = setup().await;

    let created = ctx
        .opportunities
        .create(create_input("T1"), &ctx.ada)
        .await
        .unwrap();

    let mut input = edit_input("T1 changed");
    input.description = "Changed.".to_string();

    let result = ctx.opportunities.edit(created.id, input, &ctx.bob).await;
    assert!(matches!(result, Err(OpportunityError::Forbidden)));

    // record unchanged
    let current = ctx.opportunities.get(created.id).await.unwrap();
    assert_eq!(current.title, "T1");
    assert_eq!(current.description, "Automate the thing.");
}

#[tokio::test]
async fn test_edit_by_owner_updates_core_fields() {
    let ctx = setup().await;

    let created = ctx
        .opportunities
        .create(create_input("T1"), &ctx.ada)
        .await
        .unwrap();

    let mut input = edit_input("T1 v2");
    input.business_unit = "Logistics".to_string();

    let updated = ctx
        .opportunities
        .edit(created.id, input, &ctx.ada)
        .await
        .unwrap();
    assert_eq!(updated.title, "T1 v2");
    assert_eq!(updated.business_unit, "Logistics");
}

#[tokio::test]
async fn test_edit_ignores_status_and_scores_for_non_admin() {
    let ctx = setup().await;

    let created = ctx
        .opportunities
        .create(create_input("T1"), &ctx.ada)
        .await
        .unwrap();

    let mut input = edit_input("T1");
    input.status = "Qualified".to_string();
    input.value_score = "80".to_string();
    input.effort_score = "20".to_string();

    // silently ignored, no error
    let updated = ctx
        .opportunities
        .edit(created.id, input, &ctx.ada)
        .await
        .unwrap();
    assert_eq!(updated.status, "New");
    assert!(updated.value_score.is_none());
    assert!(updated.effort_score.is_none());
}

#[tokio::test]
async fn test_edit_by_admin_applies_status_and_scores() {
    let ctx = setup().await;

    let created = ctx
        .opportunities
        .create(create_input("T1"), &ctx.ada)
        .await
        .unwrap();

    let mut input = edit_input("T1");
    input.status = "Qualified".to_string();
    input.value_score = "50".to_string();

    let updated = ctx
        .opportunities
        .edit(created.id, input, &ctx.admin)
        .await
        .unwrap();
    assert_eq!(updated.status, "Qualified");
    assert_eq!(updated.value_score, Some(50));
    // effort score left blank stays unset
    assert!(updated.effort_score.is_none());
}

#[tokio::test]
async fn test_edit_rejects_invalid_scores() {
    let ctx = setup().await;

    let created = ctx
        .opportunities
        .create(create_input("T1"), &ctx.ada)
        .await
        .unwrap();

    let mut input = edit_input("T1");
    input.value_score = "101".to_string();
    let result = ctx.opportunities.edit(created.id, input, &ctx.admin).await;
    assert!(matches!(result, Err(OpportunityError::Validation(_))));

    let mut input = edit_input("T1");
    input.value_score = "abc".to_string();
    let result = ctx.opportunities.edit(created.id, input, &ctx.admin).await;
    assert!(matches!(result, Err(OpportunityError::Validation(_))));

    let current = ctx.opportunities.get(created.id).await.unwrap();
    assert!(current.value_score.is_none());
}

#[tokio::test]
async fn test_edit_is_all_or_nothing() {
    let ctx = setup().await;

    let created = ctx
        .opportunities
        .create(create_input("T1"), &ctx.ada)
        .await
        .unwrap();

    // valid score alongside an invalid required field: the whole edit fails
    let mut input = edit_input("T1");
    input.description = String::new();
    input.value_score = "60".to_string();

    let result = ctx.opportunities.edit(created.id, input, &ctx.admin).await;
    assert!(matches!(result, Err(OpportunityError::Validation(_))));

    let current = ctx.opportunities.get(created.id).await.unwrap();
    assert_eq!(current.description, "Automate the thing.");
    assert!(current.value_score.is_none());
}

#[tokio::test]
async fn test_edit_rejects_duplicate_title_excluding_self() {
    let ctx = setup().await;

    let first = ctx
        .opportunities
        .create(create_input("T1"), &ctx.ada)
        .await
        .unwrap();
    ctx.opportunities
        .create(create_input("T2"), &ctx.ada)
        .await
        .unwrap();

    // keeping its own title is fine
    ctx.opportunities
        .edit(first.id, edit_input("T1"), &ctx.ada)
        .await
        .unwrap();

    // taking another record's title is not
    let result = ctx
        .opportunities
        .edit(first.id, edit_input("T2"), &ctx.ada)
        .await;
    assert!(matches!(result, Err(OpportunityError::DuplicateTitle)));
}

#[tokio::test]
async fn test_edit_missing_record() {
    let ctx = setup().await;

    let result = ctx
        .opportunities
        .edit(9999, edit_input("T1"), &ctx.admin)
        .await;
    assert!(matches!(result, Err(OpportunityError::NotFound)));
}

#[tokio::test]
async fn test_delete_is_admin_only() {
    let ctx = setup().await;

    let created = ctx
        .opportunities
        .create(create_input("T1"), &ctx.ada)
        .await
        .unwrap();

    // neither the owner nor another regular user may delete
    let result = ctx.opportunities.delete(created.id, &ctx.ada).await;
    assert!(matches!(result, Err(OpportunityError::Forbidden)));
    let result = ctx.opportunities.delete(created.id, &ctx.bob).await;
    assert!(matches!(result, Err(OpportunityError::Forbidden)));
    assert_eq!(ctx.opportunities.list().await.unwrap().len(), 1);

    ctx.opportunities
        .delete(created.id, &ctx.admin)
        .await
        .unwrap();
    assert!(ctx.opportunities.list().await.unwrap().is_empty());

    let result = ctx.opportunities.delete(created.id, &ctx.admin).await;
    assert!(matches!(result, Err(OpportunityError::NotFound)));
}
