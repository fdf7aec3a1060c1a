//! Persistence collaborators: the single-profile-per-user store and the
//! append-only import audit log.
//!
//! Both are traits so the import service and handlers can run against
//! Postgres in production and in-memory doubles in tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::extraction::models::{ExtractedProfile, ExtractionReport, OverallStatus};
use crate::models::profile::{ImportAuditRow, ProfileRow};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StoredProfile {
    pub user_id: Uuid,
    pub profile: ExtractedProfile,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AuditRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub report: ExtractionReport,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Creates or replaces the user's profile and returns the stored copy.
    async fn upsert(&self, user_id: Uuid, profile: &ExtractedProfile) -> Result<StoredProfile>;

    async fn get(&self, user_id: Uuid) -> Result<Option<StoredProfile>>;
}

#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn append(&self, user_id: Uuid, report: &ExtractionReport) -> Result<AuditRecord>;

    /// All recorded attempts for a user, oldest first.
    async fn history(&self, user_id: Uuid) -> Result<Vec<AuditRecord>>;
}

// ────────────────────────────────────────────────────────────────────────────
// Postgres implementations
// ────────────────────────────────────────────────────────────────────────────

pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn upsert(&self, user_id: Uuid, profile: &ExtractedProfile) -> Result<StoredProfile> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO profiles
                (user_id, name, email, experience, education, skills, imported_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            ON CONFLICT (user_id) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                experience = EXCLUDED.experience,
                education = EXCLUDED.education,
                skills = EXCLUDED.skills,
                imported_at = EXCLUDED.imported_at,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(Json(&profile.experience))
        .bind(Json(&profile.education))
        .bind(&profile.skills)
        .bind(profile.imported_at)
        .fetch_one(&self.pool)
        .await?;

        info!("Stored profile for user {user_id}");
        Ok(stored_from_row(row))
    }

    async fn get(&self, user_id: Uuid) -> Result<Option<StoredProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(stored_from_row))
    }
}

fn stored_from_row(row: ProfileRow) -> StoredProfile {
    StoredProfile {
        user_id: row.user_id,
        profile: ExtractedProfile {
            name: row.name,
            email: row.email,
            experience: row.experience.0,
            education: row.education.0,
            skills: row.skills,
            imported_at: row.imported_at,
        },
        updated_at: row.updated_at,
    }
}

pub struct PgAuditLog {
    pool: PgPool,
}

impl PgAuditLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLog for PgAuditLog {
    async fn append(&self, user_id: Uuid, report: &ExtractionReport) -> Result<AuditRecord> {
        let page_count = i32::try_from(report.page_count)?;
        // Append-only: audit rows are never updated.
        let row = sqlx::query_as::<_, ImportAuditRow>(
            r#"
            INSERT INTO import_audit
                (id, user_id, overall_status, diagnostics, page_count, config_version, message)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(report.overall_status.as_str())
        .bind(Json(&report.diagnostics))
        .bind(page_count)
        .bind(&report.config_version)
        .bind(&report.message)
        .fetch_one(&self.pool)
        .await?;

        audit_from_row(row)
    }

    async fn history(&self, user_id: Uuid) -> Result<Vec<AuditRecord>> {
        sqlx::query_as::<_, ImportAuditRow>(
            "SELECT * FROM import_audit WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(audit_from_row)
        .collect()
    }
}

fn audit_from_row(row: ImportAuditRow) -> Result<AuditRecord> {
    let overall_status = OverallStatus::parse(&row.overall_status).ok_or_else(|| {
        anyhow!(
            "Unknown overall_status '{}' in audit row {}",
            row.overall_status,
            row.id
        )
    })?;
    Ok(AuditRecord {
        id: row.id,
        user_id: row.user_id,
        report: ExtractionReport {
            overall_status,
            diagnostics: row.diagnostics.0,
            page_count: usize::try_from(row.page_count)?,
            config_version: row.config_version,
            message: row.message,
        },
        created_at: row.created_at,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory doubles
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub mod memory {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct InMemoryProfileStore {
        profiles: Mutex<HashMap<Uuid, StoredProfile>>,
        fail_writes: bool,
    }

    impl InMemoryProfileStore {
        /// A profile store whose writes always fail.
        pub fn failing() -> Self {
            Self {
                fail_writes: true,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl ProfileStore for InMemoryProfileStore {
        async fn upsert(&self, user_id: Uuid, profile: &ExtractedProfile) -> Result<StoredProfile> {
            if self.fail_writes {
                return Err(anyhow!("profile store unavailable"));
            }
            let stored = StoredProfile {
                user_id,
                profile: profile.clone(),
                updated_at: Utc::now(),
            };
            self.profiles
                .lock()
                .map_err(|_| anyhow!("profile store poisoned"))?
                .insert(user_id, stored.clone());
            Ok(stored)
        }

        async fn get(&self, user_id: Uuid) -> Result<Option<StoredProfile>> {
            Ok(self
                .profiles
                .lock()
                .map_err(|_| anyhow!("profile store poisoned"))?
                .get(&user_id)
                .cloned())
        }
    }

    #[derive(Default)]
    pub struct InMemoryAuditLog {
        records: Mutex<Vec<AuditRecord>>,
        fail_writes: bool,
    }

    impl InMemoryAuditLog {
        /// An audit log whose writes always fail.
        pub fn failing() -> Self {
            Self {
                fail_writes: true,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl AuditLog for InMemoryAuditLog {
        async fn append(&self, user_id: Uuid, report: &ExtractionReport) -> Result<AuditRecord> {
            if self.fail_writes {
                return Err(anyhow!("audit log unavailable"));
            }
            let record = AuditRecord {
                id: Uuid::new_v4(),
                user_id,
                report: report.clone(),
                created_at: Utc::now(),
            };
            self.records
                .lock()
                .map_err(|_| anyhow!("audit log poisoned"))?
                .push(record.clone());
            Ok(record)
        }

        async fn history(&self, user_id: Uuid) -> Result<Vec<AuditRecord>> {
            Ok(self
                .records
                .lock()
                .map_err(|_| anyhow!("audit log poisoned"))?
                .iter()
                .filter(|r| r.user_id == user_id)
                .cloned()
                .collect())
        }
    }
}
