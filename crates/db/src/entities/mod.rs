//! `SeaORM` entity definitions.

pub mod income_sources;
pub mod sea_orm_active_enums;
pub mod transactions;
