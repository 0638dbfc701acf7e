//! SQL implementation of the device repository

use crate::error::DbError;
use crate::repositories::device::{Device, DeviceRepository, DeviceUpsert};
use crate::DbClient;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

/// SQL implementation of the device repository
#[derive(Debug, Clone)]
pub struct SqlDeviceRepository {
    db_client: DbClient,
}

impl SqlDeviceRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    /// The underlying client, used for health checks.
    pub fn db_client(&self) -> &DbClient {
        &self.db_client
    }
}

// Timestamps are stored as RFC 3339 text because DateTime<Utc> doesn't implement Decode for sqlx::Any
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(column: &str, value: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| DbError::DecodeError(format!("{}: {}", column, e)))
}

fn device_from_row(row: &AnyRow) -> Result<Device, DbError> {
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(Device {
        device_id: row.try_get("device_id")?,
        username: row.try_get("username")?,
        created_at: parse_timestamp("created_at", &created_at)?,
        updated_at: parse_timestamp("updated_at", &updated_at)?,
    })
}

impl DeviceRepository for SqlDeviceRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing device schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS devices (
                device_id TEXT PRIMARY KEY NOT NULL,
                username TEXT NOT NULL CHECK (length(username) > 0),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
        "#;

        self.db_client.execute(query).await?;

        info!("Device schema initialized successfully");
        Ok(())
    }

    async fn upsert_device(&self, device_id: &str, username: &str) -> Result<DeviceUpsert, DbError> {
        debug!("Upserting device: {}", device_id);

        let now = format_timestamp(Utc::now());
        let query = r#"
            INSERT INTO devices (device_id, username, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (device_id) DO UPDATE
            SET username = excluded.username, updated_at = excluded.updated_at
            RETURNING device_id, username, created_at, updated_at
        "#;

        let row = sqlx::query(query)
            .bind(device_id)
            .bind(username)
            .bind(&now)
            .bind(&now)
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to upsert device {}: {}", device_id, e);
                DbError::from_query(e)
            })?;

        let device = device_from_row(&row)?;
        let created = device.created_at == device.updated_at;

        if created {
            info!("Device {} created", device_id);
        } else {
            info!("Device {} updated", device_id);
        }
        Ok(DeviceUpsert { device, created })
    }

    async fn find_by_device_id(&self, device_id: &str) -> Result<Option<Device>, DbError> {
        debug!("Finding device: {}", device_id);

        let query = r#"
            SELECT device_id, username, created_at, updated_at
            FROM devices
            WHERE device_id = $1
        "#;

        let result = sqlx::query(query)
            .bind(device_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find device {}: {}", device_id, e);
                DbError::from_query(e)
            })?;

        result.as_ref().map(device_from_row).transpose()
    }
}
