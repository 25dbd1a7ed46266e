//! Creates the default staff accounts and offering types. Rows that already
//! exist (by email, or by offering type code) are left untouched.

use anyhow::Context;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use church_finance::{
    config::Config,
    database::{create_pool, run_migrations},
    entities::{UserRole, offering_type_entity, user_entity},
    utils::hash_password,
};

struct SeedUser {
    name: String,
    email: String,
    role: UserRole,
    phone: String,
    address: String,
}

fn seed_users() -> Vec<SeedUser> {
    let mut users = vec![
        SeedUser {
            name: "Admin User".into(),
            email: "admin@church.local".into(),
            role: UserRole::Admin,
            phone: "1234567890".into(),
            address: "123 Church St".into(),
        },
        SeedUser {
            name: "Accountant User".into(),
            email: "accountant@church.local".into(),
            role: UserRole::Accountant,
            phone: "0987654321".into(),
            address: "456 Faith Ave".into(),
        },
        SeedUser {
            name: "Pastor John".into(),
            email: "pastor@church.local".into(),
            role: UserRole::Pastor,
            phone: "5555555555".into(),
            address: "789 Hope Lane".into(),
        },
    ];
    for i in 1..=2 {
        users.push(SeedUser {
            name: format!("Member {i}"),
            email: format!("member{i}@church.local"),
            role: UserRole::Member,
            phone: format!("555000000{i}"),
            address: format!("{i}00 Church Rd"),
        });
    }
    users
}

const OFFERING_TYPES: &[(&str, &str, &str)] = &[
    ("General Offering", "GEN", "Sunday service offering"),
    ("Building Fund", "BUILD", "Construction and maintenance of church buildings"),
    ("Missions", "MISSION", "Support for missionaries and outreach"),
    ("Thanksgiving", "THANKS", "Thanksgiving and special gratitude offerings"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_toml().context("Failed to load configuration")?;
    let pool = create_pool(&config.database)
        .await
        .context("Failed to connect to the database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let password = std::env::var("SEED_PASSWORD").unwrap_or_else(|_| "password".to_string());
    let password_hash = hash_password(&password)?;
    let now = Utc::now();

    for user in seed_users() {
        let existing = user_entity::Entity::find()
            .filter(user_entity::Column::Email.eq(user.email.as_str()))
            .one(&pool)
            .await?;
        if existing.is_some() {
            log::info!("User {} already exists, skipping", user.email);
            continue;
        }

        user_entity::ActiveModel {
            name: Set(user.name),
            email: Set(user.email.clone()),
            password_hash: Set(password_hash.clone()),
            role: Set(user.role),
            is_active: Set(true),
            phone: Set(Some(user.phone)),
            address: Set(Some(user.address)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&pool)
        .await
        .with_context(|| format!("Failed to create user {}", user.email))?;
        log::info!("Created {} user {}", user.role, user.email);
    }

    for (name, code, description) in OFFERING_TYPES {
        let existing = offering_type_entity::Entity::find()
            .filter(offering_type_entity::Column::Code.eq(*code))
            .one(&pool)
            .await?;
        if existing.is_some() {
            log::info!("Offering type {code} already exists, skipping");
            continue;
        }

        offering_type_entity::ActiveModel {
            name: Set(name.to_string()),
            code: Set(code.to_string()),
            description: Set(Some(description.to_string())),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&pool)
        .await
        .with_context(|| format!("Failed to create offering type {code}"))?;
        log::info!("Created offering type {code}");
    }

    log::info!("Seeding completed");
    Ok(())
}
