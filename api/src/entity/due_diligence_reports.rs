//! SeaORM model for the `due_diligence_reports` table

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "due_diligence_reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub quotation_id: Uuid,
    pub provider_id: Uuid,
    pub registry_score: i32,
    pub financial_score: i32,
    pub certifications_score: i32,
    pub references_score: i32,
    pub overall_score: i32,
    pub risk_level: String,
    pub flags: Json,
    pub simulated: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
