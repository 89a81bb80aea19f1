//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::{Path, PathBuf};

/// Execute a configuration action.
///
/// `path` is the file the configuration was loaded from (or would be).
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            println!("{}", config.to_toml()?);
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Init { force } => match init_config(path, force)? {
            Some(written) => {
                println!("{}", formatter.success(&format!("Wrote {}", written.display())))
            }
            None => println!(
                "{}",
                formatter.warning(&format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                ))
            ),
        },
    }

    Ok(())
}

/// Write a default configuration unless one exists and `force` is off.
fn init_config(path: &Path, force: bool) -> Result<Option<PathBuf>> {
    if path.exists() && !force {
        return Ok(None);
    }
    Config::default().save_to(path)?;
    Ok(Some(path.to_path_buf()))
}
