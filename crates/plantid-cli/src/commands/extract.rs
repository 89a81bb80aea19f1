//! Extract command implementation.

use super::open_history;
use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use plantid_extractor::{Extraction, ResponseExtractor};
use std::fs;
use std::io::{self, Read};

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let raw = read_input(args.input.as_deref())?;
    let extractor = ResponseExtractor::new(config.extractor.clone());
    let extraction = extractor.extract_with_trace(raw);

    if args.trace {
        eprintln!("{}", formatter.info(&describe(&extraction)));
    }
    println!("{}", formatter.format_info(&extraction.info)?);

    if args.save {
        let image = args
            .image
            .ok_or_else(|| CliError::InvalidInput("--save needs --image".to_string()))?;
        let mut history = open_history(config)?;
        match history.append(&image, extraction.info)? {
            Some(entry) => eprintln!("{}", formatter.success(&format!("Saved to history: {}", entry.id))),
            None => eprintln!("{}", formatter.warning("Not added to history (already recorded or no scientific name)")),
        }
    }

    Ok(())
}

/// Read a response from a file, or from stdin for `-` / no argument.
fn read_input(input: Option<&str>) -> Result<String> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(fs::read_to_string(path)?),
    }
}

fn describe(extraction: &Extraction) -> String {
    let strategy = extraction
        .strategy
        .map(|s| s.name())
        .unwrap_or("none");
    format!("payload: {:?}, strategy: {}", extraction.payload, strategy)
}
