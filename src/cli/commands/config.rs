use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, header, success, warning};
use std::path::Path;
use std::process::Command;

/// `$EDITOR`, then `$VISUAL`, then the platform's stock editor.
fn system_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn try_edit(editor: &str, path: &Path) -> bool {
    Command::new(editor)
        .arg(path)
        .status()
        .is_ok_and(|s| s.success())
}

fn edit(path: &Path, requested: Option<&str>) {
    let fallback = system_editor();

    // requested editor first, then the system one
    let mut candidates = vec![requested.unwrap_or(fallback.as_str())];
    if candidates[0] != fallback {
        candidates.push(fallback.as_str());
    }

    for (i, editor) in candidates.iter().enumerate() {
        if try_edit(editor, path) {
            success(format!("Configuration file edited with '{}'", editor));
            return;
        }
        if let Some(next) = candidates.get(i + 1) {
            warning(format!(
                "Editor '{}' not available, falling back to '{}'",
                editor, next
            ));
        }
    }

    error(format!(
        "Could not open {} with any editor; edit it by hand.",
        path.display()
    ));
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };

    if *print_config {
        header("Current configuration");
        let yaml = serde_yaml::to_string(cfg).map_err(|e| AppError::Config(e.to_string()))?;
        println!("{}", yaml);
    }

    if *edit_config {
        edit(&Config::config_file(), editor.as_deref());
    }

    Ok(())
}
