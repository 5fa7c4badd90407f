use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display name, unique across the portal (max 20 chars, enforced in the service layer)
    #[sea_orm(unique)]
    pub name: String,

    /// Stored lowercase
    #[sea_orm(unique, indexed)]
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    /// "admin" or "regular"
    pub role: String,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::opportunities::Entity")]
    Opportunities,
}

impl Related<super::opportunities::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Opportunities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
