use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::extraction::models::{EducationEntry, ExperienceEntry, ExtractionDiagnostic};

/// One row per user; a new import replaces the previous profile.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub experience: Json<Vec<ExperienceEntry>>,
    pub education: Json<Vec<EducationEntry>>,
    pub skills: Vec<String>,
    pub imported_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Append-only record of every import attempt, failed ones included.
#[derive(Debug, Clone, FromRow)]
pub struct ImportAuditRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub overall_status: String,
    pub diagnostics: Json<Vec<ExtractionDiagnostic>>,
    pub page_count: i32,
    pub config_version: String,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}
