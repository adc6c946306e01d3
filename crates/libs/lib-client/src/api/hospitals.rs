//! # Hospital Endpoints

use super::client::{decode, ApiClient};
use crate::Result;
use shared::{Hospital, HospitalSearchRequest};

/// Nearest hospitals first.
pub async fn find_hospitals(
    client: &ApiClient,
    request: &HospitalSearchRequest,
) -> Result<Vec<Hospital>> {
    let response = client
        .client
        .post(client.url("/hospitals"))
        .json(request)
        .send()
        .await?;

    let hospitals: Vec<Hospital> = decode(response).await?;
    tracing::debug!(count = hospitals.len(), "Hospitals received");
    Ok(hospitals)
}
