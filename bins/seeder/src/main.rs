//! Database seeder for Sideline development and testing.
//!
//! Seeds a handful of income sources and half a year of transactions so
//! the dashboard has something to show during local development.
//!
//! Usage: cargo run --bin seeder

use chrono::{Datelike, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use uuid::Uuid;

use sideline_db::entities::{
    income_sources,
    sea_orm_active_enums::{SourceType, TransactionType},
    transactions,
};

/// Fixed source IDs so re-running the seeder stays idempotent.
const FREELANCE_SOURCE_ID: &str = "00000000-0000-0000-0000-000000000001";
const BLOG_SOURCE_ID: &str = "00000000-0000-0000-0000-000000000002";
const APP_SOURCE_ID: &str = "00000000-0000-0000-0000-000000000003";
const ARCHIVED_SOURCE_ID: &str = "00000000-0000-0000-0000-000000000004";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = sideline_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding income sources...");
    seed_sources(&db).await;

    println!("Seeding transactions...");
    seed_transactions(&db).await;

    println!("Seeding complete!");
}

fn parse_id(value: &str) -> Uuid {
    Uuid::parse_str(value).unwrap()
}

/// Mid-month date `offset` months before the current one.
fn months_ago(offset: u32) -> NaiveDate {
    Utc::now()
        .date_naive()
        .with_day(15)
        .and_then(|date| date.checked_sub_months(Months::new(offset)))
        .expect("date arithmetic")
}

async fn seed_sources(db: &DatabaseConnection) {
    let sources = [
        (
            FREELANCE_SOURCE_ID,
            "Freelance clients",
            SourceType::Freelance,
            Some("Contract web development work"),
            true,
        ),
        (
            BLOG_SOURCE_ID,
            "Tech blog",
            SourceType::Passive,
            Some("Ad revenue and affiliate links"),
            true,
        ),
        (
            APP_SOURCE_ID,
            "Budgeting app",
            SourceType::Project,
            Some("Side project subscriptions"),
            true,
        ),
        (
            ARCHIVED_SOURCE_ID,
            "Old tutoring gig",
            SourceType::Etc,
            None,
            false,
        ),
    ];

    for (id, name, source_type, description, is_active) in sources {
        let id = parse_id(id);
        if income_sources::Entity::find_by_id(id)
            .one(db)
            .await
            .ok()
            .flatten()
            .is_some()
        {
            println!("  Source '{name}' already exists, skipping...");
            continue;
        }

        let now = Utc::now().into();
        let source = income_sources::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            source_type: Set(source_type),
            description: Set(description.map(ToString::to_string)),
            is_active: Set(is_active),
            created_at: Set(now),
            updated_at: Set(now),
        };
        source.insert(db).await.expect("Failed to insert source");
        println!("  Seeded source '{name}'");
    }
}

async fn seed_transactions(db: &DatabaseConnection) {
    let existing = transactions::Entity::find()
        .count(db)
        .await
        .expect("Failed to count transactions");
    if existing > 0 {
        println!("  Transactions already exist, skipping...");
        return;
    }

    // (source, type, amount, months ago, description, hours)
    let rows: Vec<(&str, TransactionType, i64, u32, &str, Option<i64>)> = vec![
        (FREELANCE_SOURCE_ID, TransactionType::Revenue, 250_000, 0, "Client invoice", Some(20)),
        (FREELANCE_SOURCE_ID, TransactionType::Revenue, 180_000, 1, "Client invoice", Some(16)),
        (FREELANCE_SOURCE_ID, TransactionType::Expense, 30_000, 1, "Contractor fees", None),
        (FREELANCE_SOURCE_ID, TransactionType::Revenue, 320_000, 3, "Client invoice", Some(28)),
        (BLOG_SOURCE_ID, TransactionType::Revenue, 45_000, 0, "Ad revenue payout", Some(4)),
        (BLOG_SOURCE_ID, TransactionType::Revenue, 38_000, 1, "Ad revenue payout", Some(3)),
        (BLOG_SOURCE_ID, TransactionType::Expense, 12_000, 2, "Hosting renewal", None),
        (BLOG_SOURCE_ID, TransactionType::Revenue, 51_000, 4, "Affiliate commission", Some(5)),
        (APP_SOURCE_ID, TransactionType::Revenue, 90_000, 0, "Subscription payouts", Some(12)),
        (APP_SOURCE_ID, TransactionType::Expense, 25_000, 0, "App store fees", None),
        (APP_SOURCE_ID, TransactionType::Revenue, 75_000, 2, "Subscription payouts", Some(10)),
        (ARCHIVED_SOURCE_ID, TransactionType::Revenue, 60_000, 5, "Tutoring session", Some(6)),
    ];

    for (source_id, transaction_type, amount, offset, description, hours) in rows {
        let now = Utc::now().into();
        let transaction = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            source_id: Set(parse_id(source_id)),
            transaction_type: Set(transaction_type),
            amount: Set(Decimal::from(amount)),
            date: Set(months_ago(offset)),
            description: Set(description.to_string()),
            is_recurring: Set(false),
            hours: Set(hours.map(Decimal::from)),
            created_at: Set(now),
            updated_at: Set(now),
        };
        transaction
            .insert(db)
            .await
            .expect("Failed to insert transaction");
    }
    println!("  Seeded demo transactions");
}
