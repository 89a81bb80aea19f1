//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use plantid_domain::{HistoryEntry, RecognitionInfo};
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{
        object::{Columns, Rows},
        Alignment, Modify, Style, Width,
    },
};

/// Shown in place of an empty field.
pub const EMPTY_FIELD: &str = "Chưa có dữ liệu";

const FIELD_LABELS: [&str; 8] = [
    "Tên phổ thông",
    "Tên khoa học",
    "Loại",
    "Phân loại sinh học",
    "Tóm tắt sơ bộ",
    "Mô tả",
    "Đặc điểm sinh học",
    "SGK THPT",
];

const VALUE_WIDTH: usize = 72;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a recognition record.
    pub fn format_info(&self, info: &RecognitionInfo) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&info_json(info))?),
            OutputFormat::Table => Ok(self.info_table(info)),
            OutputFormat::Quiet => Ok(display_value(&info.scientific_name).to_string()),
        }
    }

    /// Format a single history entry with its full record.
    pub fn format_entry(&self, entry: &HistoryEntry) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&entry_json(entry))?),
            OutputFormat::Table => {
                let header = format!(
                    "{}  {}  {}",
                    entry.id,
                    format_timestamp(entry.timestamp_ms),
                    entry.image
                );
                Ok(format!(
                    "{}\n{}",
                    self.colorize(&header, "cyan"),
                    self.info_table(&entry.info)
                ))
            }
            OutputFormat::Quiet => Ok(entry.id.to_string()),
        }
    }

    /// Format a list of history entries.
    pub fn format_entries(&self, entries: &[HistoryEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let values: Vec<Value> = entries.iter().map(entry_json).collect();
                Ok(serde_json::to_string_pretty(&values)?)
            }
            OutputFormat::Table => Ok(self.entries_table(entries)),
            OutputFormat::Quiet => {
                let ids: Vec<String> = entries.iter().map(|e| e.id.to_string()).collect();
                Ok(ids.join("\n"))
            }
        }
    }

    fn info_table(&self, info: &RecognitionInfo) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Trường", "Nội dung"]);

        for (label, value) in FIELD_LABELS.iter().zip(info.fields()) {
            builder.push_record([*label, display_value(value)]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .with(Modify::new(Columns::single(1)).with(Width::wrap(VALUE_WIDTH)));

        table.to_string()
    }

    fn entries_table(&self, entries: &[HistoryEntry]) -> String {
        if entries.is_empty() {
            return self.colorize("No history entries.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Time", "Common name", "Scientific name", "Image"]);

        for entry in entries {
            let id = entry.id.to_string();
            builder.push_record([
                id.as_str(),
                format_timestamp(entry.timestamp_ms).as_str(),
                display_value(&entry.info.common_name),
                display_value(&entry.info.scientific_name),
                entry.image.as_str(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn display_value(value: &str) -> &str {
    if value.trim().is_empty() {
        EMPTY_FIELD
    } else {
        value
    }
}

/// Local time for an epoch-millis timestamp.
pub fn format_timestamp(timestamp_ms: u64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp_ms as i64)
        .map(|dt| {
            dt.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "-".to_string())
}

fn info_json(info: &RecognitionInfo) -> Value {
    json!({
        "commonName": info.common_name,
        "scientificName": info.scientific_name,
        "type": info.kind,
        "classification": info.classification,
        "summary": info.summary,
        "description": info.description,
        "biology": info.biology,
        "textbook": info.textbook,
    })
}

fn entry_json(entry: &HistoryEntry) -> Value {
    json!({
        "id": entry.id.to_string(),
        "timestamp": entry.timestamp_ms,
        "image": entry.image,
        "info": info_json(&entry.info),
    })
}
