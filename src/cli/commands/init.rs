use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use rusqlite::Connection;

/// `teamclock init`: write the config (unless `--test`) and bring the
/// database schema up to date.
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.as_deref(), cli.test)?;

    if !cli.test {
        info(format!("Config file: {}", Config::config_file().display()));
    }
    info(format!("Database:    {}", cfg.database));

    let conn = Connection::open(&cfg.database)?;
    init_db(&conn)?;
    ttlog_quiet(&conn, "init", &cfg.database, "schema initialized");

    success("teamclock is ready.");
    Ok(())
}
