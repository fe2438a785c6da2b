//! `SeaORM` Entity for transactions table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::TransactionType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub source_id: Uuid,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub date: Date,
    pub description: String,
    pub is_recurring: bool,
    pub hours: Option<Decimal>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::income_sources::Entity",
        from = "Column::SourceId",
        to = "super::income_sources::Column::Id",
        on_delete = "Cascade"
    )]
    IncomeSources,
}

impl Related<super::income_sources::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IncomeSources.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
