//! SeaORM model for the `provider_profiles` table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "provider_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub firm_name: Option<String>,
    pub registration_number: Option<String>,
    pub country: Option<String>,
    pub years_experience: Option<i32>,
    pub consultant_count: Option<i32>,
    pub sap_modules: Json,
    pub certifications: Json,
    pub hourly_rate_min_cents: Option<i64>,
    pub hourly_rate_max_cents: Option<i64>,
    pub onboarding_step: i32,
    pub completed: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
