//! Label table for free-text responses
//!
//! One rule per output field: an ordered list of patterns and a capture
//! policy. The first pattern producing a non-blank capture wins.

use once_cell::sync::Lazy;
use plantid_domain::RecognitionInfo;
use regex::Regex;

/// How much text follows a label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// The rest of the label's line
    Line,
    /// Until the next non-indented line, or the end of the text
    Block,
}

/// Output field a rule fills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// `common_name`
    CommonName,
    /// `scientific_name`
    ScientificName,
    /// `kind`
    Kind,
    /// `classification`
    Classification,
    /// `summary`
    Summary,
    /// `description`
    Description,
    /// `biology`
    Biology,
    /// `textbook`
    Textbook,
}

/// Where a value is found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// `Label: value`, with optional `**` emphasis around the label or colon
    Label(&'static str),
    /// Same as `Label`, but only at the start of a line (after list markers)
    LineLabel(&'static str),
    /// Emphasized value (`*..*` to `***..***`) right after an English phrase
    Emphasized(&'static str),
}

impl Source {
    /// Compile this source with the given capture policy
    fn compile(self, capture: Capture) -> Regex {
        let pattern = match self {
            Source::Label(label) => label_pattern("", label, capture),
            Source::LineLabel(label) => label_pattern(r"(?m)^[ \t>*•\-]*", label, capture),
            Source::Emphasized(phrase) => {
                let value = match capture {
                    Capture::Line => r"[^*\n]+?",
                    Capture::Block => r"[^*]+?",
                };
                format!(r"(?i){phrase}\*{{1,3}}({value})\*{{1,3}}")
            }
        };
        Regex::new(&pattern).unwrap()
    }
}

/// Patterns for one field
#[derive(Debug)]
pub struct LabelRule {
    /// Field this rule fills
    pub field: Field,
    /// Capture policy applied to every source
    pub capture: Capture,
    /// Sources, tried in order
    pub sources: Vec<Source>,
    patterns: Vec<Regex>,
}

impl LabelRule {
    /// Build a rule, compiling every source with `capture`
    pub fn new(field: Field, capture: Capture, sources: &[Source]) -> Self {
        Self {
            field,
            capture,
            sources: sources.to_vec(),
            patterns: sources.iter().map(|s| s.compile(capture)).collect(),
        }
    }

    /// First non-blank capture of any pattern, trimmed of whitespace and
    /// markdown emphasis
    pub fn capture(&self, text: &str) -> Option<String> {
        self.patterns.iter().find_map(|pattern| {
            let value = pattern.captures(text)?.get(1)?.as_str();
            let value = value.trim().trim_matches('*').trim();
            (!value.is_empty()).then(|| value.to_string())
        })
    }
}

fn label_pattern(prefix: &str, label: &str, capture: Capture) -> String {
    let tail = match capture {
        Capture::Line => r"[ \t]*([^\n]+)",
        Capture::Block => r"\s*([\s\S]*?)(?:\n\S|$)",
    };
    format!(r"(?i){prefix}{label}[ \t]*\**[ \t]*[:\-][ \t]*\**{tail}")
}

/// The label table, in output field order
pub static LABEL_RULES: Lazy<Vec<LabelRule>> = Lazy::new(|| {
    use Capture::{Block, Line};
    use Source::{Emphasized, Label, LineLabel};

    vec![
        LabelRule::new(
            Field::CommonName,
            Line,
            &[
                Label(r"Tên\s*phổ\s*thông"),
                Emphasized(r"commonly known as (?:the )?"),
            ],
        ),
        LabelRule::new(
            Field::ScientificName,
            Line,
            &[
                Label(r"Tên\s*khoa\s*học"),
                Emphasized(r"scientific name is "),
            ],
        ),
        LabelRule::new(Field::Kind, Line, &[LineLabel(r"Loại(?:\s*mẫu\s*vật)?")]),
        LabelRule::new(
            Field::Classification,
            Line,
            &[Label(r"Phân\s*loại\s*sinh\s*học")],
        ),
        LabelRule::new(Field::Summary, Line, &[Label(r"Tóm\s*tắt\s*sơ\s*bộ")]),
        LabelRule::new(
            Field::Description,
            Block,
            &[Label(r"Mô\s*tả(?:\s*chi\s*tiết)?")],
        ),
        LabelRule::new(Field::Biology, Block, &[Label(r"Đặc\s*điểm\s*sinh\s*học")]),
        LabelRule::new(Field::Textbook, Line, &[Label(r"SGK\s*THPT")]),
    ]
});

/// Look up the rule for one field
pub fn rule_for(field: Field) -> &'static LabelRule {
    LABEL_RULES
        .iter()
        .find(|rule| rule.field == field)
        .unwrap_or_else(|| unreachable!("every field has a label rule"))
}

/// Apply the whole table to a text. Unmatched fields stay empty.
pub fn extract_labeled(text: &str) -> RecognitionInfo {
    let mut info = RecognitionInfo::default();
    for rule in LABEL_RULES.iter() {
        let Some(value) = rule.capture(text) else {
            continue;
        };
        let slot = match rule.field {
            Field::CommonName => &mut info.common_name,
            Field::ScientificName => &mut info.scientific_name,
            Field::Kind => &mut info.kind,
            Field::Classification => &mut info.classification,
            Field::Summary => &mut info.summary,
            Field::Description => &mut info.description,
            Field::Biology => &mut info.biology,
            Field::Textbook => &mut info.textbook,
        };
        *slot = value;
    }
    info
}
