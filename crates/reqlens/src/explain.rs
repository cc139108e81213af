//! Character breakdown into UTF-16 code units
//!
//! Useful for spotting invisible characters, emoji sequences and mojibake
//! in captured queries.

use serde::{Deserialize, Serialize};

/// One UTF-16 code unit of the explained text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeUnitInfo {
    /// `U+XXXX` notation
    pub code: String,
    /// 8-bit groups, most significant first
    pub binary: Vec<String>,
    /// Numeric value of the unit
    pub decimal: u16,
    /// The unit as text; lone surrogates render as U+FFFD
    pub character: String,
}

impl CodeUnitInfo {
    fn new(unit: u16) -> Self {
        let character = char::from_u32(u32::from(unit))
            .unwrap_or(char::REPLACEMENT_CHARACTER)
            .to_string();
        let binary = if unit > 0xFF {
            vec![format!("{:08b}", unit >> 8), format!("{:08b}", unit & 0xFF)]
        } else {
            vec![format!("{:08b}", unit)]
        };

        Self {
            code: format!("U+{:04X}", unit),
            binary,
            decimal: unit,
            character,
        }
    }
}

/// Break text into its UTF-16 code units
pub fn explain(text: &str) -> Vec<CodeUnitInfo> {
    text.encode_utf16().map(CodeUnitInfo::new).collect()
}

/// Length of the text in UTF-16 code units
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explain_ascii() {
        let units = explain("a");
        assert_eq!(
            units,
            vec![CodeUnitInfo {
                code: "U+0061".to_string(),
                binary: vec!["01100001".to_string()],
                decimal: 97,
                character: "a".to_string(),
            }]
        );
    }

    #[test]
    fn test_explain_bmp() {
        let units = explain("\u{2026}");
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].code, "U+2026");
        assert_eq!(units[0].binary, vec!["00100000", "00100110"]);
        assert_eq!(units[0].character, "\u{2026}");
    }

    #[test]
    fn test_explain_surrogate_pair() {
        let units = explain("😀");
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].code, "U+D83D");
        assert_eq!(units[1].code, "U+DE00");
        assert_eq!(units[0].binary, vec!["11011000", "00111101"]);
        assert_eq!(units[0].character, "\u{FFFD}");
        assert_eq!(utf16_len("😀a"), 3);
    }

    #[test]
    fn test_explain_empty() {
        assert!(explain("").is_empty());
        assert_eq!(utf16_len(""), 0);
    }
}
