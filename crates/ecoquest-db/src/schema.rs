//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings, enums as strings with ASSERT
//! constraints, and timestamps as RFC 3339 strings.

use serde::Deserialize;
use surrealdb::{Connection, Surreal};
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, Deserialize)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- User accounts
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD name ON TABLE user TYPE string;
DEFINE FIELD username ON TABLE user TYPE string;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD password_hash ON TABLE user TYPE string;
DEFINE FIELD role ON TABLE user TYPE string \
    ASSERT $value IN ['User', 'Admin'];
DEFINE FIELD total_points ON TABLE user TYPE int DEFAULT 0;
DEFINE FIELD missions_completed ON TABLE user TYPE int DEFAULT 0;
DEFINE FIELD last_completed_date ON TABLE user TYPE option<string>;
DEFINE FIELD pending_approvals ON TABLE user TYPE array DEFAULT [];
DEFINE FIELD pending_approvals.* ON TABLE user TYPE int;
DEFINE FIELD created_at ON TABLE user TYPE string;
DEFINE FIELD updated_at ON TABLE user TYPE string;
DEFINE INDEX idx_user_username ON TABLE user COLUMNS username UNIQUE;

-- =======================================================================
-- Submissions
-- =======================================================================
DEFINE TABLE submission SCHEMAFULL;
DEFINE FIELD username ON TABLE submission TYPE string;
DEFINE FIELD mission_id ON TABLE submission TYPE int;
DEFINE FIELD submitted_at ON TABLE submission TYPE string;
DEFINE FIELD location ON TABLE submission FLEXIBLE TYPE option<object>;
DEFINE FIELD proof_link ON TABLE submission TYPE string;
DEFINE FIELD description ON TABLE submission TYPE string;
DEFINE FIELD agreed_to_terms ON TABLE submission TYPE bool;
DEFINE FIELD status ON TABLE submission TYPE string \
    ASSERT $value IN ['Pending', 'Approved', 'Rejected'];
DEFINE INDEX idx_submission_user_mission ON TABLE submission \
    COLUMNS username, mission_id;
DEFINE INDEX idx_submission_status ON TABLE submission COLUMNS status;

-- =======================================================================
-- Daily mission sets (one per calendar day)
-- =======================================================================
DEFINE TABLE mission_set SCHEMAFULL;
DEFINE FIELD date_key ON TABLE mission_set TYPE string;
DEFINE FIELD mission_ids ON TABLE mission_set TYPE array;
DEFINE FIELD mission_ids.* ON TABLE mission_set TYPE int;
DEFINE FIELD created_at ON TABLE mission_set TYPE string;
DEFINE INDEX idx_mission_set_date ON TABLE mission_set \
    COLUMNS date_key UNIQUE;

-- =======================================================================
-- Last mission reset marker (single record 'last')
-- =======================================================================
DEFINE TABLE mission_reset SCHEMAFULL;
DEFINE FIELD date_key ON TABLE mission_reset TYPE string;

-- =======================================================================
-- Current session (single record 'current')
-- =======================================================================
DEFINE TABLE session SCHEMAFULL;
DEFINE FIELD username ON TABLE session TYPE string;
DEFINE FIELD role ON TABLE session TYPE string \
    ASSERT $value IN ['User', 'Admin'];
DEFINE FIELD logged_in_at ON TABLE session TYPE string;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
///
/// Exposed for testing with in-memory SurrealDB instances that
/// bypass the migration runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}
