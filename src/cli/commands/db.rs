use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::{pending_migrations, run_pending_migrations};
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Maintenance actions on the SQLite file, run in a fixed order:
/// migrate, info, check, vacuum.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    if *migrate {
        let pending = pending_migrations(&pool.conn)?;
        if pending.is_empty() {
            info("Schema is up to date.");
        } else {
            info(format!("Applying {} migration(s): {}", pending.len(), pending.join(", ")));
            run_pending_migrations(&pool.conn)?;
            success("Migrations applied.");
        }
    }

    if *show_info {
        stats::print_db_info(&mut pool, &cfg.database)?;
    }

    if *check {
        let verdict: String = pool
            .conn
            .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
        if verdict == "ok" {
            success("Integrity check passed.");
        } else {
            warning(format!("Integrity check reported: {}", verdict));
        }
    }

    if *vacuum {
        pool.conn.execute_batch("VACUUM;")?;
        success("Database compacted.");
    }

    Ok(())
}
