use sea_orm::entity::prelude::*;

/// Application user account.
///
/// `roles` is a JSON array of role tags; the baseline role is computed at
/// read time and never stored. `address_id` and `verification_id` point at
/// exclusively-owned rows that the repository deletes with the user.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    pub roles: Json,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub is_banned: Option<bool>,
    pub address_id: Option<i64>,
    pub verification_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::products::Entity")]
    Products,
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
    #[sea_orm(has_many = "super::product_reports::Entity")]
    ProductReports,
    #[sea_orm(
        belongs_to = "super::addresses::Entity",
        from = "Column::AddressId",
        to = "super::addresses::Column::Id"
    )]
    Address,
    #[sea_orm(
        belongs_to = "super::user_verifications::Entity",
        from = "Column::VerificationId",
        to = "super::user_verifications::Column::Id"
    )]
    Verification,
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::product_reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductReports.def()
    }
}

impl Related<super::addresses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Address.def()
    }
}

impl Related<super::user_verifications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Verification.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
