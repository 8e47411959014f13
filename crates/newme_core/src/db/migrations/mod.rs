//! Schema steps for the state database and the upgrade runner.
//!
//! # Invariants
//! - Step numbers start at 1 and increase by exactly one.
//! - `PRAGMA user_version` always names the last step that committed.
//! - An upgrade runs every pending step in one transaction; a failing step
//!   leaves the database at the version it was opened with.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

/// One numbered schema change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SchemaStep {
    number: u32,
    label: &'static str,
    script: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    number: 1,
    label: "app_state",
    script: include_str!("0001_app_state.sql"),
}];

/// What the runner has to do for a database at a given version.
#[derive(Debug, PartialEq, Eq)]
enum UpgradePlan {
    Current,
    Run(&'static [SchemaStep]),
    TooNew { found: u32, known: u32 },
}

fn plan_upgrade(found: u32) -> UpgradePlan {
    let known = latest_version();
    if found > known {
        return UpgradePlan::TooNew { found, known };
    }
    let pending_from = SCHEMA_STEPS
        .iter()
        .position(|step| step.number > found)
        .unwrap_or(SCHEMA_STEPS.len());
    match &SCHEMA_STEPS[pending_from..] {
        [] => UpgradePlan::Current,
        pending => UpgradePlan::Run(pending),
    }
}

/// Highest schema step this build can apply.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.iter().map(|step| step.number).max().unwrap_or(0)
}

/// Version recorded in the database header.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?)
}

/// Brings the database up to `latest_version`.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer build.
/// - `Sqlite` when a step fails; nothing from the run is kept.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let pending = match plan_upgrade(found) {
        UpgradePlan::Current => return Ok(()),
        UpgradePlan::TooNew { found, known } => {
            return Err(DbError::UnsupportedSchemaVersion {
                db_version: found,
                latest_supported: known,
            })
        }
        UpgradePlan::Run(pending) => pending,
    };

    let tx = conn.transaction()?;
    for step in pending {
        tx.execute_batch(step.script)?;
        tx.pragma_update(None, "user_version", step.number)?;
        debug!(
            "event=db_migrate_step module=db status=ok step={} label={}",
            step.number, step.label
        );
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={} steps={}",
        found,
        latest_version(),
        pending.len()
    );
    Ok(())
}
