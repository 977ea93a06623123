use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Entries of the attachment-choice sheet.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum UploadOption {
    #[strum(to_string = "PDF", serialize = "pdf")]
    Pdf,
    #[strum(to_string = "Text Input", serialize = "text")]
    TextInput,
    #[strum(to_string = "Memory")]
    Memory,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_labels_in_menu_order() {
        let labels: Vec<String> = UploadOption::iter().map(|o| o.to_string()).collect();
        assert_eq!(labels, vec!["PDF", "Text Input", "Memory"]);
    }

    #[test]
    fn test_parse_label_and_short_name() {
        assert_eq!(UploadOption::from_str("pdf").unwrap(), UploadOption::Pdf);
        assert_eq!(UploadOption::from_str("Text Input").unwrap(), UploadOption::TextInput);
        assert_eq!(UploadOption::from_str("TEXT").unwrap(), UploadOption::TextInput);
        assert_eq!(UploadOption::from_str("memory").unwrap(), UploadOption::Memory);
        assert!(UploadOption::from_str("camera").is_err());
    }
}
