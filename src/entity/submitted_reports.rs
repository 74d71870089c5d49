use sea_orm::entity::prelude::*;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submitted_reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub report_date: Date,
    pub period_start: Date,
    pub period_end: Date,
    pub sales_snapshot: Value,
    pub expenses_snapshot: Value,
    pub summary_snapshot: Value,
    pub transaction_ids: Value,
    pub expense_ids: Value,
    pub notes: Option<String>,
    pub submitted_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
