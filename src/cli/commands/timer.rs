use crate::acting_user;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::timer::{TimerService, TimerSnapshot};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::colors::colorize_status;
use crate::utils::secs2readable;
use crate::utils::time::format_optional_ts;

fn print_snapshot(s: &TimerSnapshot) {
    let verb = s.op.as_str();

    if !s.op.is_mutating() {
        info(format!("Entity #{}", s.entity_id));
    } else if s.changed {
        success(format!("{} applied to entity #{}.", verb, s.entity_id));
    } else {
        info(format!(
            "Nothing to do: entity #{} already {}.",
            s.entity_id,
            s.status.to_db_str()
        ));
    }

    println!("  status   : {}", colorize_status(s.status));
    println!("  elapsed  : {}", secs2readable(s.elapsed_seconds, false));
    println!("  total    : {}s", s.total_seconds);
    println!(
        "  started  : {}",
        format_optional_ts(s.last_started_at.as_ref())
    );
    if let Some(entry) = &s.entry {
        println!(
            "  entry #{} : {} → {}",
            entry.id,
            format_optional_ts(Some(&entry.start_time)),
            format_optional_ts(entry.end_time.as_ref())
        );
    }
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Timer { op, id, json } = &cli.command {
        let user = acting_user(cli, cfg)?;
        let mut pool = DbPool::open_initialized(&cfg.database)?;

        let clock = SystemClock;
        let service = TimerService::new(&clock);
        let snapshot = service.apply(&mut pool, *id, user, *op)?;

        if *json {
            let out = serde_json::to_string_pretty(&snapshot)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", out);
        } else {
            print_snapshot(&snapshot);
        }
    }

    Ok(())
}
