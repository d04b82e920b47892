//! Client (gym member) model and DTOs.

use chrono::NaiveDate;
use mastergym_core::client::ClientStatus;
use mastergym_core::report::ReportClient;
use mastergym_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `clients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub gym_id: DbId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// One of `active`, `inactive`, `overdue`.
    pub status: String,
    pub registered_on: NaiveDate,
    pub membership_starts_on: NaiveDate,
    pub membership_expires_on: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a client. The gym comes from the caller's tenant.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClient {
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Defaults to `active`.
    pub status: Option<ClientStatus>,
    /// Defaults to today.
    pub registered_on: Option<NaiveDate>,
    /// Defaults to today.
    pub membership_starts_on: Option<NaiveDate>,
    pub membership_expires_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl From<&Client> for ReportClient {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            first_name: client.first_name.clone(),
            last_name: client.last_name.clone(),
        }
    }
}
