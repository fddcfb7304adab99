use crate::acting_user;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        entity,
        force,
    } = &cli.command
    {
        let user = acting_user(cli, cfg)?;
        let mut pool = DbPool::open_initialized(&cfg.database)?;
        ExportLogic::export(&mut pool, user, *format, file, *entity, *force)?;
    }
    Ok(())
}
