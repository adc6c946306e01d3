//! # Hospital DTOs
//!
//! Bodies for `POST /api/hospitals`. Results are ranked by ascending distance
//! from the caller's coordinates.

use serde::{Deserialize, Serialize};

/// Coordinates are optional on the wire so that missing values are reported as a
/// validation error (400) rather than a body rejection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct HospitalSearchRequest {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default, alias = "search_term", skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: i64,
    pub name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(alias = "distance_meters")]
    pub distance_meters: f64,
}
