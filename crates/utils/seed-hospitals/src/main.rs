//! # Seed Hospitals Utility
//!
//! This binary replaces every hospital in the database with the records of a
//! JSON file.
//!
//! **WARNING**: Existing hospital rows are deleted.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --package seed-hospitals --bin seed_hospitals -- hospitals.json
//! ```
//!
//! The file is a JSON array of `{name, address, phone?, website?, latitude, longitude}`.
//!
//! The program will:
//! 1. Read and check the file
//! 2. Connect to the database and apply migrations
//! 3. Ask for confirmation
//! 4. Replace all hospitals if confirmed

use anyhow::{bail, Context};
use lib_core::model::store::models::HospitalForCreate;
use lib_core::model::store::HospitalRepository;
use lib_core::{create_pool, run_migrations};
use lib_utils::get_env_or;
use std::io::{self, Write};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    println!("============================================");
    println!("  Seed Hospitals Utility");
    println!("============================================");
    println!();

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: seed_hospitals <hospitals.json>");
    };

    let raw = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
    let hospitals = parse_hospitals(&raw)?;
    println!("Read {} hospital(s) from {}.", hospitals.len(), path);

    // Connect to database
    let database_url = get_env_or("DATABASE_URL", "sqlite:data/firstaid.db");
    println!("Connecting to {}...", database_url);
    let pool = create_pool(&database_url).await?;
    run_migrations(&pool).await?;
    println!("Connected successfully.");
    println!();

    let existing = HospitalRepository::count(&pool).await?;
    println!("WARNING: This will replace the {} hospital(s) currently stored.", existing);

    // Ask for confirmation
    print!("Continue? (yes/no): ");
    io::stdout().flush()?;

    let mut confirmation = String::new();
    io::stdin().read_line(&mut confirmation)?;
    let confirmation = confirmation.trim().to_lowercase();

    if confirmation != "yes" && confirmation != "y" {
        println!("Operation cancelled.");
        return Ok(());
    }

    let inserted = HospitalRepository::replace_all(&pool, &hospitals).await?;

    println!();
    println!("Successfully stored {} hospital(s).", inserted);

    Ok(())
}

/// Parse the seed file and reject records that could never be located.
fn parse_hospitals(raw: &str) -> anyhow::Result<Vec<HospitalForCreate>> {
    let hospitals: Vec<HospitalForCreate> =
        serde_json::from_str(raw).context("hospital file is not a JSON array of hospitals")?;

    for (index, hospital) in hospitals.iter().enumerate() {
        if hospital.name.trim().is_empty() {
            bail!("record {}: name cannot be empty", index);
        }
        if !(-90.0..=90.0).contains(&hospital.latitude)
            || !(-180.0..=180.0).contains(&hospital.longitude)
        {
            bail!(
                "record {} ({}): coordinates out of range",
                index,
                hospital.name
            );
        }
    }

    Ok(hospitals)
}
