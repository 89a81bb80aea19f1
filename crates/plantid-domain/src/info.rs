//! RecognitionInfo - the normalized result of a recognition response

/// Normalized biological record extracted from a recognition response.
///
/// Every field is always present. Missing data is an empty string, never an
/// absent value, so consumers can render any field without checking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognitionInfo {
    /// Common (Vietnamese) name
    pub common_name: String,

    /// Scientific (Latin) name
    pub scientific_name: String,

    /// Kind of organism or object (plant, animal, object...)
    pub kind: String,

    /// Biological classification
    pub classification: String,

    /// Short summary
    pub summary: String,

    /// Detailed description
    pub description: String,

    /// Biology: life cycle, ecology, anatomy
    pub biology: String,

    /// Textbook reference
    pub textbook: String,
}

impl RecognitionInfo {
    /// Build the sentinel record returned when nothing could be extracted.
    ///
    /// # Examples
    ///
    /// ```
    /// use plantid_domain::RecognitionInfo;
    ///
    /// let info = RecognitionInfo::no_data("no matching data");
    /// assert_eq!(info.summary, "no matching data");
    /// assert!(info.scientific_name.is_empty());
    /// ```
    pub fn no_data(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Self::default()
        }
    }

    /// Trim every field; whitespace-only values become empty.
    pub fn normalized(mut self) -> Self {
        for field in self.fields_mut() {
            let trimmed = field.trim();
            if trimmed.len() != field.len() {
                *field = trimmed.to_string();
            }
        }
        self
    }

    /// True when every field is empty
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|f| f.trim().is_empty())
    }

    /// True when a non-blank scientific name is present
    pub fn has_scientific_name(&self) -> bool {
        !self.scientific_name.trim().is_empty()
    }

    /// Case-insensitive substring match on the common or scientific name.
    ///
    /// An empty query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.common_name.to_lowercase().contains(&query)
            || self.scientific_name.to_lowercase().contains(&query)
    }

    /// Field values in display order
    pub fn fields(&self) -> [&str; 8] {
        [
            self.common_name.as_str(),
            self.scientific_name.as_str(),
            self.kind.as_str(),
            self.classification.as_str(),
            self.summary.as_str(),
            self.description.as_str(),
            self.biology.as_str(),
            self.textbook.as_str(),
        ]
    }

    fn fields_mut(&mut self) -> [&mut String; 8] {
        [
            &mut self.common_name,
            &mut self.scientific_name,
            &mut self.kind,
            &mut self.classification,
            &mut self.summary,
            &mut self.description,
            &mut self.biology,
            &mut self.textbook,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mai_vang() -> RecognitionInfo {
        RecognitionInfo {
            common_name: "Mai vàng".to_string(),
            scientific_name: "Ochna integerrima".to_string(),
            kind: "thực vật".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_data_sentinel() {
        let info = RecognitionInfo::no_data("Không có dữ liệu phù hợp");
        assert_eq!(info.summary, "Không có dữ liệu phù hợp");
        assert!(info.common_name.is_empty());
        assert!(!info.has_scientific_name());
        assert!(!info.is_empty());
    }

    #[test]
    fn test_normalized_blanks_whitespace() {
        let info = RecognitionInfo {
            common_name: "  Mai vàng \n".to_string(),
            kind: "   \t".to_string(),
            ..Default::default()
        }
        .normalized();

        assert_eq!(info.common_name, "Mai vàng");
        assert_eq!(info.kind, "");
    }

    #[test]
    fn test_is_empty() {
        assert!(RecognitionInfo::default().is_empty());
        assert!(RecognitionInfo { biology: "  ".into(), ..Default::default() }.is_empty());
        assert!(!mai_vang().is_empty());
    }

    #[test]
    fn test_matches_query_case_insensitive() {
        let info = mai_vang();
        assert!(info.matches_query("MAI"));
        assert!(info.matches_query("ochna"));
        assert!(info.matches_query(""));
        assert!(!info.matches_query("hoa sen"));
    }

    #[test]
    fn test_matches_query_ignores_other_fields() {
        let info = mai_vang();
        assert!(!info.matches_query("thực vật"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: normalized fields never carry leading/trailing whitespace
        #[test]
        fn test_normalized_fields_are_trimmed(
            common in "\\PC*",
            scientific in "[ \t\n]*[A-Za-z ]*[ \t\n]*",
            biology in "[ \t\n]*",
        ) {
            let info = RecognitionInfo {
                common_name: common,
                scientific_name: scientific,
                biology,
                ..Default::default()
            }
            .normalized();

            for field in info.fields() {
                prop_assert_eq!(field, field.trim());
            }
            prop_assert!(info.biology.is_empty());
        }

        /// Property: normalizing twice changes nothing
        #[test]
        fn test_normalized_idempotent(summary in "\\PC*", textbook in "\\PC*") {
            let once = RecognitionInfo { summary, textbook, ..Default::default() }.normalized();
            let twice = once.clone().normalized();
            prop_assert_eq!(once, twice);
        }
    }
}
