use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "addons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub price_modifier: i64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_addons::Entity")]
    ProductAddons,
}

impl Related<super::product_addons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductAddons.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
