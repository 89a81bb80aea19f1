//! Extraction strategies over a `content.parts` sequence
//!
//! Each strategy is a pure function returning `Some` only when it found
//! usable data; the extractor stops at the first `Some`.

use crate::config::{ExtractorConfig, Strategy};
use crate::labels::extract_labeled;
use crate::parser::{
    find_fenced_block, first_brace_object, info_from_json, parse_json, strip_code_fence,
};
use plantid_domain::RecognitionInfo;
use serde_json::Value;

type StrategyFn = fn(&[Value], &ExtractorConfig) -> Option<RecognitionInfo>;

impl Strategy {
    /// Run this strategy over the parts
    pub(crate) fn apply(self, parts: &[Value], config: &ExtractorConfig) -> Option<RecognitionInfo> {
        let run: StrategyFn = match self {
            Strategy::FencedJson => fenced_json,
            Strategy::FunctionResponse => function_response,
            Strategy::InlineJson => inline_json,
            Strategy::LabeledText => labeled_text,
        };
        run(parts, config)
    }
}

/// `text` fields of the parts that have one, in order
fn text_parts(parts: &[Value]) -> impl Iterator<Item = &str> {
    parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
}

/// A record with at least one non-empty field
fn usable(info: RecognitionInfo) -> Option<RecognitionInfo> {
    (!info.is_empty()).then_some(info)
}

fn record_from_text(text: &str) -> Option<RecognitionInfo> {
    let value = parse_json(text).ok()?;
    usable(info_from_json(&value).ok()?)
}

/// First text part that is JSON once a surrounding code fence is removed
fn fenced_json(parts: &[Value], _config: &ExtractorConfig) -> Option<RecognitionInfo> {
    text_parts(parts).find_map(|text| record_from_text(strip_code_fence(text)))
}

/// `functionResponse.response.data`, or its first `items` element
fn function_response(parts: &[Value], _config: &ExtractorConfig) -> Option<RecognitionInfo> {
    parts
        .iter()
        .filter_map(|part| part.pointer("/functionResponse/response/data"))
        .find_map(|data| {
            let record = match data.get("items").and_then(Value::as_array) {
                Some(items) if !items.is_empty() => &items[0],
                _ => data,
            };
            usable(info_from_json(record).ok()?)
        })
}

/// JSON embedded in the prose of the first text part: a fenced block, else
/// the first `{...}`
fn inline_json(parts: &[Value], _config: &ExtractorConfig) -> Option<RecognitionInfo> {
    let text = text_parts(parts).next()?;
    find_fenced_block(text)
        .and_then(record_from_text)
        .or_else(|| record_from_text(first_brace_object(text)?))
}

/// Label table over the first text part
fn labeled_text(parts: &[Value], config: &ExtractorConfig) -> Option<RecognitionInfo> {
    let text = text_parts(parts).next()?.trim();
    if text.is_empty() {
        return None;
    }

    let mut info = extract_labeled(text);
    if info.summary.is_empty() && config.summary_falls_back_to_text {
        info.summary = text.to_string();
    }
    usable(info.normalized())
}
