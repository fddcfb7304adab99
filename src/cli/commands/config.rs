use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use std::process::Command;

fn default_editor() -> String {
    std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".into()
            } else {
                "vi".into()
            }
        })
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };

    let path = Config::config_file();

    if *print_config {
        let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
        info(format!("Effective configuration ({})", path.display()));
        println!("{}", yaml);
    }

    if *edit_config {
        if !path.exists() {
            cfg.save_to(&path)?;
        }

        let program = editor.clone().unwrap_or_else(default_editor);
        let status = Command::new(&program).arg(&path).status().map_err(|e| {
            AppError::Config(format!("cannot launch editor '{}': {}", program, e))
        })?;

        if !status.success() {
            return Err(AppError::Config(format!(
                "editor '{}' exited with {}",
                program, status
            )));
        }
        success(format!("Saved {}", path.display()));
    }

    Ok(())
}
