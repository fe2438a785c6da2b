//! Initial database migration.
//!
//! Creates the enums, tables, indexes, and `updated_at` triggers for
//! income sources and transactions.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: TABLES
        // ============================================================
        db.execute_unprepared(INCOME_SOURCES_SQL).await?;
        db.execute_unprepared(TRANSACTIONS_SQL).await?;

        // ============================================================
        // PART 3: TRIGGERS & FUNCTIONS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Income source categories
CREATE TYPE source_type AS ENUM (
    'FREELANCE',
    'PROJECT',
    'PASSIVE',
    'ETC'
);

-- Transaction direction
CREATE TYPE transaction_type AS ENUM ('REVENUE', 'EXPENSE');
";

const INCOME_SOURCES_SQL: &str = r"
CREATE TABLE income_sources (
    id UUID PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    source_type source_type NOT NULL DEFAULT 'ETC',
    description TEXT,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_income_sources_is_active ON income_sources (is_active);
CREATE INDEX idx_income_sources_created_at ON income_sources (created_at);
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE transactions (
    id UUID PRIMARY KEY,
    source_id UUID NOT NULL REFERENCES income_sources (id) ON DELETE CASCADE,
    transaction_type transaction_type NOT NULL,
    -- Max 99,999,999,999.99
    amount NUMERIC(12, 2) NOT NULL CHECK (amount >= 0),
    date DATE NOT NULL,
    description TEXT NOT NULL CHECK (description <> ''),
    is_recurring BOOLEAN NOT NULL DEFAULT FALSE,
    -- Time invested; NULL means not tracked
    hours NUMERIC(10, 2) CHECK (hours >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_transactions_source_id ON transactions (source_id);
CREATE INDEX idx_transactions_date ON transactions (date);
CREATE INDEX idx_transactions_type ON transactions (transaction_type);
";

const TRIGGERS_SQL: &str = r"
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = NOW();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_income_sources_updated_at
    BEFORE UPDATE ON income_sources
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_transactions_updated_at
    BEFORE UPDATE ON transactions
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS transactions CASCADE;
DROP TABLE IF EXISTS income_sources CASCADE;
DROP FUNCTION IF EXISTS set_updated_at CASCADE;
DROP TYPE IF EXISTS transaction_type;
DROP TYPE IF EXISTS source_type;
";
