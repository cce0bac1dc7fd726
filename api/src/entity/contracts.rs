//! SeaORM model for the `contracts` table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub quotation_id: Uuid,
    pub project_id: Uuid,
    pub client_id: Uuid,
    pub provider_id: Uuid,
    pub terms: Json,
    pub total_amount_cents: i64,
    pub status: String,
    pub client_signed_at: Option<DateTimeWithTimeZone>,
    pub provider_signed_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
