//! Recognize command implementation.

use super::{open_history, present};
use crate::cli::RecognizeArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use plantid_client::AgentClient;
use plantid_domain::traits::RecognitionClient;
use plantid_domain::Origin;
use plantid_extractor::{Extraction, ResponseExtractor};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Execute the recognize command.
pub fn execute_recognize(args: RecognizeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let bytes = fs::read(&args.image)?;
    let image_uri = match args.image_uri {
        Some(uri) => uri,
        None => file_uri(&args.image)?,
    };

    let client = AgentClient::new(config.agent.clone())?;
    let extractor = ResponseExtractor::new(config.extractor.clone());
    let extraction = recognize_image(&client, &extractor, &bytes)?;

    if extraction.is_sentinel() {
        eprintln!("{}", formatter.warning("No plant information found in the response"));
    }

    if args.no_save {
        println!("{}", formatter.format_info(&extraction.info)?);
        return Ok(());
    }

    let mut history = open_history(config)?;
    let (output, recorded) = present(
        &mut history,
        formatter,
        &image_uri,
        &extraction.info,
        Origin::Live,
    )?;
    println!("{}", output);

    match recorded {
        Some(entry) => eprintln!("{}", formatter.success(&format!("Saved to history: {}", entry.id))),
        None if !extraction.is_sentinel() => {
            eprintln!("{}", formatter.info("Not added to history (already recorded or no scientific name)"))
        }
        None => {}
    }

    Ok(())
}

/// Send the photo and extract a record from whatever comes back.
pub fn recognize_image<C>(
    client: &C,
    extractor: &ResponseExtractor,
    image: &[u8],
) -> Result<Extraction>
where
    C: RecognitionClient,
    CliError: From<C::Error>,
{
    if image.is_empty() {
        return Err(CliError::InvalidInput("image file is empty".to_string()));
    }

    let encoded = STANDARD.encode(image);
    debug!("Uploading {} bytes ({} encoded)", image.len(), encoded.len());

    let raw = client.recognize(&encoded)?;
    Ok(extractor.extract_with_trace(raw))
}

fn file_uri(path: &Path) -> Result<String> {
    let absolute = fs::canonicalize(path)?;
    Ok(format!("file://{}", absolute.display()))
}
