//! # Hospital Repository
//!
//! Nearest-hospital lookup. Candidates are filtered in SQL by an optional search
//! term (name or address, case-insensitive substring), then ranked by great-circle
//! distance from the caller.

use super::models::{Hospital, HospitalForCreate};
use super::DbPool;
use crate::error::Result;
use sqlx::query_as;
use tracing::info;

/// Mean Earth radius in meters.
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

pub struct HospitalRepository;

impl HospitalRepository {
    /// Hospitals ranked by ascending distance from `(latitude, longitude)`.
    ///
    /// Returns at most `limit` entries as `(hospital, distance_meters)` pairs.
    pub async fn nearest(
        pool: &DbPool,
        latitude: f64,
        longitude: f64,
        search_term: Option<&str>,
        limit: usize,
    ) -> Result<Vec<(Hospital, f64)>> {
        let pattern = search_term
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(like_pattern);

        let candidates = query_as::<_, Hospital>(
            "SELECT id, name, address, phone, website, latitude, longitude FROM hospitals \
             WHERE ?1 IS NULL OR name LIKE ?1 ESCAPE '\\' OR address LIKE ?1 ESCAPE '\\'",
        )
        .bind(pattern)
        .fetch_all(pool)
        .await?;

        let mut ranked: Vec<(Hospital, f64)> = candidates
            .into_iter()
            .map(|h| {
                let distance = haversine_meters(latitude, longitude, h.latitude, h.longitude);
                (h, distance)
            })
            .collect();

        ranked.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.id.cmp(&b.0.id)));
        ranked.truncate(limit);

        Ok(ranked)
    }

    /// Replace every hospital record with `hospitals`, atomically.
    pub async fn replace_all(pool: &DbPool, hospitals: &[HospitalForCreate]) -> Result<u64> {
        let mut tx = pool.begin().await?;

        let removed = sqlx::query("DELETE FROM hospitals").execute(&mut *tx).await?;

        for hospital in hospitals {
            sqlx::query(
                "INSERT INTO hospitals (name, address, phone, website, latitude, longitude) \
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(&hospital.name)
            .bind(&hospital.address)
            .bind(&hospital.phone)
            .bind(&hospital.website)
            .bind(hospital.latitude)
            .bind(hospital.longitude)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(
            removed = removed.rows_affected(),
            inserted = hospitals.len(),
            "hospital records replaced"
        );
        Ok(hospitals.len() as u64)
    }

    pub async fn count(pool: &DbPool) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM hospitals")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}

/// Great-circle distance between two points in decimal degrees.
pub fn haversine_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * a.sqrt().min(1.0).asin()
}

/// `%term%` with LIKE wildcards in the term escaped.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
