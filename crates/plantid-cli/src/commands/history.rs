//! History command implementation.

use super::open_history;
use crate::cli::{HistoryAction, HistoryArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use plantid_domain::traits::BlobStore;
use plantid_domain::EntryId;
use plantid_store::{HistoryStore, StoreError};
use std::io::{self, Write};

/// Execute a history action.
pub fn execute_history(args: HistoryArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut history = open_history(config)?;
    run_action(args.action, &mut history, formatter)
}

fn run_action<B>(
    action: HistoryAction,
    history: &mut HistoryStore<B>,
    formatter: &Formatter,
) -> Result<()>
where
    B: BlobStore,
    StoreError: From<B::Error>,
{
    match action {
        HistoryAction::List { limit } => {
            let mut entries = history.list()?;
            if let Some(limit) = limit {
                entries.truncate(limit);
            }
            println!("{}", formatter.format_entries(&entries)?);
        }
        HistoryAction::Search { query } => {
            let entries = history.search(&query)?;
            println!("{}", formatter.format_entries(&entries)?);
        }
        HistoryAction::Show { id } => {
            let id = parse_id(&id)?;
            let entry = history
                .get(id)?
                .ok_or_else(|| CliError::NotFound(id.to_string()))?;

            println!("{}", formatter.format_entry(&entry)?);
        }
        HistoryAction::Remove { ids } => {
            let ids = ids
                .iter()
                .map(|id| parse_id(id))
                .collect::<Result<Vec<_>>>()?;

            for id in ids {
                if history.remove(id)? {
                    println!("{}", formatter.success(&format!("Removed {}", id)));
                } else {
                    println!("{}", formatter.warning(&format!("No history entry {}", id)));
                }
            }
        }
        HistoryAction::Clear { yes } => {
            if !yes && !confirm("Delete the whole recognition history?")? {
                println!("{}", formatter.info("Operation cancelled"));
                return Ok(());
            }
            history.clear()?;
            println!("{}", formatter.success("History cleared"));
        }
    }

    Ok(())
}

fn parse_id(id: &str) -> Result<EntryId> {
    EntryId::from_string(id).map_err(|e| CliError::InvalidInput(format!("'{}': {}", id, e)))
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    Ok(response.trim().eq_ignore_ascii_case("y"))
}
