//! Repository for the `measurements` table.
//!
//! Every query is scoped by `gym_id`; a row of another gym behaves exactly
//! like a missing row.

use mastergym_core::paging::{MeasurementSort, PageRequest};
use mastergym_core::tenant::TenantId;
use mastergym_core::types::DbId;
use sqlx::PgPool;

use crate::models::measurement::{Measurement, MeasurementFilter, MeasurementValues};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, gym_id, client_id, measured_on, weight_kg, height_cm, chest_cm, \
    waist_cm, hip_cm, left_arm_cm, right_arm_cm, left_leg_cm, right_leg_cm, body_fat_pct, \
    notes, created_at, updated_at";

/// Tenant-scoped CRUD and listing for body measurements.
pub struct MeasurementRepo;

impl MeasurementRepo {
    /// Insert a measurement into `tenant`'s gym, returning the stored row
    /// with its server-assigned timestamps.
    ///
    /// The composite foreign key rejects a `client_id` of another gym.
    pub async fn create(
        pool: &PgPool,
        tenant: TenantId,
        values: &MeasurementValues,
    ) -> Result<Measurement, sqlx::Error> {
        let query = format!(
            "INSERT INTO measurements
                (gym_id, client_id, measured_on, weight_kg, height_cm, chest_cm, waist_cm,
                 hip_cm, left_arm_cm, right_arm_cm, left_leg_cm, right_leg_cm,
                 body_fat_pct, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING {COLUMNS}"
        );
        let q = sqlx::query_as::<_, Measurement>(&query).bind(tenant.get());
        bind_columns(q, values).fetch_one(pool).await
    }

    /// Find a measurement by id within `tenant`.
    pub async fn find_by_id(
        pool: &PgPool,
        tenant: TenantId,
        id: DbId,
    ) -> Result<Option<Measurement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM measurements WHERE id = $1 AND gym_id = $2");
        sqlx::query_as::<_, Measurement>(&query)
            .bind(id)
            .bind(tenant.get())
            .fetch_optional(pool)
            .await
    }

    /// One page of `tenant`'s measurements matching `filter`.
    pub async fn list(
        pool: &PgPool,
        tenant: TenantId,
        filter: &MeasurementFilter,
        sort: MeasurementSort,
        page: PageRequest,
    ) -> Result<Vec<Measurement>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_measurement_filter(tenant, filter);

        let query = format!(
            "SELECT {COLUMNS} FROM measurements {where_clause} \
             ORDER BY {} \
             LIMIT ${bind_idx} OFFSET ${}",
            sort.order_by(),
            bind_idx + 1
        );

        let q = bind_filter_values(sqlx::query_as::<_, Measurement>(&query), &bind_values);
        q.bind(page.limit()).bind(page.offset()).fetch_all(pool).await
    }

    /// Count `tenant`'s measurements matching `filter` (for page totals).
    pub async fn count(
        pool: &PgPool,
        tenant: TenantId,
        filter: &MeasurementFilter,
    ) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_measurement_filter(tenant, filter);

        let query = format!("SELECT COUNT(*)::BIGINT AS count FROM measurements {where_clause}");

        let q = bind_filter_values_scalar(sqlx::query_scalar::<_, i64>(&query), &bind_values);
        q.fetch_one(pool).await
    }

    /// Every measurement of one client, newest first. Used for reports.
    pub async fn list_for_client(
        pool: &PgPool,
        tenant: TenantId,
        client_id: DbId,
    ) -> Result<Vec<Measurement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM measurements \
             WHERE gym_id = $1 AND client_id = $2 \
             ORDER BY {}",
            MeasurementSort::default().order_by()
        );
        sqlx::query_as::<_, Measurement>(&query)
            .bind(tenant.get())
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// Replace every writable column of a measurement.
    ///
    /// Returns `None` if no row with `id` exists in `tenant`. `created_at`
    /// is never written; the trigger refreshes `updated_at`.
    pub async fn update(
        pool: &PgPool,
        tenant: TenantId,
        id: DbId,
        values: &MeasurementValues,
    ) -> Result<Option<Measurement>, sqlx::Error> {
        let query = format!(
            "UPDATE measurements SET
                client_id = $2,
                measured_on = $3,
                weight_kg = $4,
                height_cm = $5,
                chest_cm = $6,
                waist_cm = $7,
                hip_cm = $8,
                left_arm_cm = $9,
                right_arm_cm = $10,
                left_leg_cm = $11,
                right_leg_cm = $12,
                body_fat_pct = $13,
                notes = $14
             WHERE id = $15 AND gym_id = $1
             RETURNING {COLUMNS}"
        );
        let q = sqlx::query_as::<_, Measurement>(&query).bind(tenant.get());
        bind_columns(q, values).bind(id).fetch_optional(pool).await
    }

    /// Delete a measurement. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, tenant: TenantId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM measurements WHERE id = $1 AND gym_id = $2")
            .bind(id)
            .bind(tenant.get())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for query building
// ---------------------------------------------------------------------------

type PgQueryAs<'q, O> = sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>;

/// Bind the thirteen writable columns, in table order, after `gym_id`.
fn bind_columns<'q>(
    q: PgQueryAs<'q, Measurement>,
    v: &'q MeasurementValues,
) -> PgQueryAs<'q, Measurement> {
    q.bind(v.client_id)
        .bind(v.measured_on)
        .bind(v.weight_kg)
        .bind(v.height_cm)
        .bind(v.chest_cm)
        .bind(v.waist_cm)
        .bind(v.hip_cm)
        .bind(v.left_arm_cm)
        .bind(v.right_arm_cm)
        .bind(v.left_leg_cm)
        .bind(v.right_leg_cm)
        .bind(v.body_fat_pct)
        .bind(v.notes.as_deref())
}

/// Typed bind value for dynamically-built measurement queries.
enum BindValue {
    BigInt(i64),
}

/// Build a WHERE clause and bind values from the tenant and filter.
///
/// Returns `(where_clause, bind_values, next_bind_index)`. The tenant
/// predicate is always present, so the clause is never empty.
fn build_measurement_filter(
    tenant: TenantId,
    filter: &MeasurementFilter,
) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = vec!["gym_id = $1".to_string()];
    let mut bind_idx = 2u32;
    let mut bind_values: Vec<BindValue> = vec![BindValue::BigInt(tenant.get())];

    if let Some(client_id) = filter.client_id {
        conditions.push(format!("client_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(client_id));
    }

    let where_clause = format!("WHERE {}", conditions.join(" AND "));
    (where_clause, bind_values, bind_idx)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_filter_values<'q, O>(
    mut q: PgQueryAs<'q, O>,
    bind_values: &'q [BindValue],
) -> PgQueryAs<'q, O> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
fn bind_filter_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
        }
    }
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_always_scopes_by_tenant() {
        let (clause, values, next) =
            build_measurement_filter(TenantId::new(3), &MeasurementFilter::default());
        assert_eq!(clause, "WHERE gym_id = $1");
        assert_eq!(values.len(), 1);
        assert_eq!(next, 2);
    }

    #[test]
    fn client_filter_appends_predicate() {
        let filter = MeasurementFilter { client_id: Some(9) };
        let (clause, values, next) = build_measurement_filter(TenantId::new(3), &filter);
        assert_eq!(clause, "WHERE gym_id = $1 AND client_id = $2");
        assert_eq!(values.len(), 2);
        assert_eq!(next, 3);
    }
}
