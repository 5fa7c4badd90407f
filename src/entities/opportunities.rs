use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "opportunities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Globally unique (max 30 chars, enforced in the service layer)
    #[sea_orm(unique)]
    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub business_unit: String,

    /// Owning user; every opportunity has exactly one submitter
    pub submitted_by: i32,

    /// RFC 3339 timestamp
    pub date_submitted: String,

    #[sea_orm(column_type = "Text")]
    pub predicted_benefits: String,

    pub business_criticality: String,

    /// Open set, admin-driven ("New", "Under Review", "In Discovery", "Qualified", ...)
    pub status: String,

    /// 1-100 when present
    pub value_score: Option<i32>,

    /// 1-100 when present
    pub effort_score: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::SubmittedBy",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
