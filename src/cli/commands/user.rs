use crate::cli::parser::{Commands, UserCmd};
use crate::config::Config;
use crate::core::entities::EntityLogic;
use crate::db::pool::DbPool;
use crate::db::queries::list_users;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;
use crate::utils::time::format_optional_ts;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::User { action } = cmd {
        let mut pool = DbPool::open_initialized(&cfg.database)?;

        match action {
            UserCmd::Add { name, tenant } => {
                let tenant = tenant.as_deref().unwrap_or(&cfg.default_tenant);
                let user = EntityLogic::add_user(&mut pool, tenant, name)?;
                success(format!(
                    "Added user #{} '{}' (tenant '{}').",
                    user.id, user.name, user.tenant
                ));
            }

            UserCmd::List { tenant } => {
                let users = list_users(&pool.conn, tenant.as_deref())?;
                if users.is_empty() {
                    info("No users found.");
                    return Ok(());
                }

                let mut table = Table::new(vec!["ID", "TENANT", "NAME", "LAST SEEN"]);
                for u in &users {
                    table.add_row(vec![
                        u.id.to_string(),
                        u.tenant.clone(),
                        u.name.clone(),
                        format_optional_ts(u.last_seen.as_ref()),
                    ]);
                }
                print!("{}", table.render());
            }
        }
    }

    Ok(())
}
