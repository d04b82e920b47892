//! Repository for the `clients` table.

use chrono::NaiveDate;
use mastergym_core::tenant::TenantId;
use mastergym_core::types::DbId;
use sqlx::PgPool;

use crate::models::client::{Client, CreateClient};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, gym_id, first_name, last_name, phone, email, status, \
    registered_on, membership_starts_on, membership_expires_on, notes, created_at, updated_at";

/// Tenant-scoped access to gym members.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a client into `tenant`'s gym, returning the created row.
    pub async fn create(
        pool: &PgPool,
        tenant: TenantId,
        input: &CreateClient,
    ) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients
                (gym_id, first_name, last_name, phone, email, status,
                 registered_on, membership_starts_on, membership_expires_on, notes)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'active'),
                     COALESCE($7, CURRENT_DATE), COALESCE($8, CURRENT_DATE), $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(tenant.get())
            .bind(input.first_name.trim())
            .bind(&input.last_name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.registered_on)
            .bind(input.membership_starts_on)
            .bind(input.membership_expires_on)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a client by id within `tenant`. A client of another gym is
    /// indistinguishable from a missing one.
    pub async fn find_by_id(
        pool: &PgPool,
        tenant: TenantId,
        id: DbId,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1 AND gym_id = $2");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(tenant.get())
            .fetch_optional(pool)
            .await
    }

    /// List all clients of `tenant` ordered by name.
    pub async fn list(pool: &PgPool, tenant: TenantId) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM clients WHERE gym_id = $1 \
             ORDER BY first_name, last_name NULLS FIRST, id"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(tenant.get())
            .fetch_all(pool)
            .await
    }

    /// Clients of `tenant` whose membership expires exactly on `date`.
    pub async fn list_expiring_on(
        pool: &PgPool,
        tenant: TenantId,
        date: NaiveDate,
    ) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM clients \
             WHERE gym_id = $1 AND membership_expires_on = $2 \
             ORDER BY first_name, last_name NULLS FIRST, id"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(tenant.get())
            .bind(date)
            .fetch_all(pool)
            .await
    }
}
