use crate::acting_user;
use crate::cli::parser::{Cli, Commands, KindArg, TaskCmd};
use crate::config::Config;
use crate::core::clock::{Clock, SystemClock};
use crate::core::entities::EntityLogic;
use crate::core::timer::calculator::elapsed_for;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::entity_kind::EntityKind;
use crate::ui::messages::{info, success};
use crate::utils::secs2readable;
use crate::utils::table::Table;

impl From<KindArg> for EntityKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Task => EntityKind::Task,
            KindArg::Timesheet => EntityKind::Timesheet,
        }
    }
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Task { action } = &cli.command {
        let user = acting_user(cli, cfg)?;
        let mut pool = DbPool::open_initialized(&cfg.database)?;

        match action {
            TaskCmd::Add { title, kind, owner } => {
                let entity =
                    EntityLogic::add_entity(&mut pool, user, (*kind).into(), title, *owner)?;
                success(format!(
                    "Created {} #{} '{}' (owner {}).",
                    entity.kind.to_db_str(),
                    entity.id,
                    entity.title,
                    entity.owner_id
                ));
            }

            TaskCmd::List { running } => {
                let entities = EntityLogic::list_for_user(&mut pool, user, *running)?;
                if entities.is_empty() {
                    info("No entities found.");
                    return Ok(());
                }

                let now = SystemClock.now();
                let mut table = Table::new(vec!["ID", "KIND", "TITLE", "OWNER", "STATUS", "ELAPSED"]);
                for e in &entities {
                    table.add_row(vec![
                        e.id.to_string(),
                        e.kind.to_db_str().to_string(),
                        e.title.clone(),
                        e.owner_id.to_string(),
                        e.timer.status.to_db_str().to_string(),
                        secs2readable(elapsed_for(&e.timer, now), true),
                    ]);
                }
                print!("{}", table.render());
            }
        }
    }

    Ok(())
}
