use crate::acting_user;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::clock::{Clock, SystemClock};
use crate::core::entities::EntityLogic;
use crate::core::timeline::build_timeline;
use crate::core::timer::calculator::elapsed_for;
use crate::db::pool::DbPool;
use crate::db::queries::{load_entries, require_user};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use crate::utils::colors::colorize_status;
use crate::utils::formatting::{bold, print_separator};
use crate::utils::secs2readable;
use crate::utils::time::{display_ts, format_optional_ts};

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { id } = &cli.command {
        let user_id = acting_user(cli, cfg)?;
        let mut pool = DbPool::open_initialized(&cfg.database)?;

        let user = require_user(&pool.conn, user_id)?;
        let entity = EntityLogic::get(&mut pool, *id)?;
        if entity.tenant != user.tenant {
            return Err(AppError::Unauthorized {
                kind: entity.kind.label(),
                id: entity.id,
                user: user.id,
            });
        }

        let now = SystemClock.now();
        let entries = load_entries(&pool.conn, entity.id)?;
        let timeline = build_timeline(&entries, now);

        println!(
            "{} #{} {}  [{}]",
            entity.kind.label(),
            entity.id,
            bold(&entity.title),
            colorize_status(entity.timer.status)
        );
        print_separator(&cfg.separator_char, 60);

        if timeline.intervals.is_empty() {
            info("No ledger entries yet.");
        }

        for (n, iv) in timeline.intervals.iter().enumerate() {
            let end = if iv.is_open() {
                "running".to_string()
            } else {
                format_optional_ts(iv.end.as_ref())
            };
            println!(
                "{:>3}. {} → {:<19}  {}  (user {})",
                n + 1,
                display_ts(&iv.start),
                end,
                secs2readable(iv.seconds, true),
                iv.user_id
            );
        }

        if !timeline.breaks.is_empty() {
            println!();
            println!("Breaks:");
            for b in &timeline.breaks {
                println!(
                    "     {} → {}  {}",
                    display_ts(&b.start),
                    display_ts(&b.end),
                    secs2readable(b.seconds, true)
                );
            }
        }

        print_separator(&cfg.separator_char, 60);
        println!(
            "Worked: {} | Breaks: {} | Timer: {}",
            secs2readable(timeline.worked_seconds, false),
            secs2readable(timeline.break_seconds, false),
            secs2readable(elapsed_for(&entity.timer, now), false)
        );
    }

    Ok(())
}
