//! Parser and reader configuration options

use crate::errors::{CsvError, CsvResult};
use serde::{Deserialize, Serialize};

/// Configuration for tokenizing CSV lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvParserOptions {
    /// Whether the first line is a header and should be skipped (default: true)
    pub skip_header: bool,
    /// Field separator character (default: comma)
    pub field_separator: char,
    /// Quote character for fields containing separators (default: double quote)
    pub quote_char: char,
    /// Lines starting with this character are ignored (default: none)
    pub comment_character: Option<char>,
    /// Trim surrounding whitespace from every field (default: false)
    pub trim_fields: bool,
}

impl Default for CsvParserOptions {
    fn default() -> Self {
        Self {
            skip_header: true,
            field_separator: ',',
            quote_char: '"',
            comment_character: None,
            trim_fields: false,
        }
    }
}

impl CsvParserOptions {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure header skipping
    pub fn skip_header(mut self, skip_header: bool) -> Self {
        self.skip_header = skip_header;
        self
    }

    /// Set the field separator
    pub fn field_separator(mut self, separator: char) -> Self {
        self.field_separator = separator;
        self
    }

    /// Set the quote character
    pub fn quote_char(mut self, quote_char: char) -> Self {
        self.quote_char = quote_char;
        self
    }

    /// Set the comment character
    pub fn comment_character(mut self, comment_character: char) -> Self {
        self.comment_character = Some(comment_character);
        self
    }

    /// Configure field trimming
    pub fn trim_fields(mut self, trim_fields: bool) -> Self {
        self.trim_fields = trim_fields;
        self
    }

    /// Check that every configured character can be handed to the tokenizer
    pub fn validate(&self) -> CsvResult<()> {
        if !self.field_separator.is_ascii() {
            return Err(CsvError::config(format!(
                "field separator '{}' must be an ASCII character",
                self.field_separator
            )));
        }
        if !self.quote_char.is_ascii() {
            return Err(CsvError::config(format!(
                "quote character '{}' must be an ASCII character",
                self.quote_char
            )));
        }
        if self.field_separator == self.quote_char {
            return Err(CsvError::config(
                "field separator and quote character must differ",
            ));
        }
        if let Some(comment) = self.comment_character {
            if !comment.is_ascii() {
                return Err(CsvError::config(format!(
                    "comment character '{}' must be an ASCII character",
                    comment
                )));
            }
        }
        Ok(())
    }

    /// Convert separator to u8 for csv crate
    pub fn separator_u8(&self) -> u8 {
        self.field_separator as u8
    }

    /// Convert quote char to u8 for csv crate
    pub fn quote_char_u8(&self) -> u8 {
        self.quote_char as u8
    }

    /// Convert comment character to u8 for csv crate
    pub fn comment_u8(&self) -> Option<u8> {
        self.comment_character.map(|c| c as u8)
    }
}

/// Configuration for splitting raw text into lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvReaderOptions {
    /// Tokens that terminate a line; the longest match wins
    pub new_lines: Vec<String>,
}

impl Default for CsvReaderOptions {
    fn default() -> Self {
        Self {
            new_lines: vec!["\r\n".to_string(), "\n".to_string()],
        }
    }
}

impl CsvReaderOptions {
    /// Create reader options with custom line terminators
    pub fn new<I, S>(new_lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            new_lines: new_lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Check that at least one non-empty terminator is configured
    pub fn validate(&self) -> CsvResult<()> {
        if self.new_lines.is_empty() {
            return Err(CsvError::config("at least one line terminator is required"));
        }
        if self.new_lines.iter().any(String::is_empty) {
            return Err(CsvError::config("line terminators must not be empty"));
        }
        Ok(())
    }

    /// Split `data` into lines on any configured terminator
    pub fn split_lines<'a>(&self, data: &'a str) -> Vec<&'a str> {
        let mut lines = Vec::new();
        let mut line_start = 0;
        let mut cursor = 0;

        while cursor < data.len() {
            let rest = &data[cursor..];
            let matched = self
                .new_lines
                .iter()
                .filter(|token| !token.is_empty() && rest.starts_with(token.as_str()))
                .map(String::len)
                .max();

            match matched {
                Some(len) => {
                    lines.push(&data[line_start..cursor]);
                    cursor += len;
                    line_start = cursor;
                }
                None => {
                    cursor += rest.chars().next().map_or(1, char::len_utf8);
                }
            }
        }

        if line_start < data.len() {
            lines.push(&data[line_start..]);
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parser_options() {
        let options = CsvParserOptions::default();
        assert!(options.skip_header);
        assert_eq!(options.field_separator, ',');
        assert_eq!(options.quote_char, '"');
        assert_eq!(options.comment_character, None);
        assert!(!options.trim_fields);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_parser_options_builder() {
        let options = CsvParserOptions::new()
            .skip_header(false)
            .field_separator(';')
            .quote_char('\'')
            .comment_character('#')
            .trim_fields(true);

        assert!(!options.skip_header);
        assert_eq!(options.separator_u8(), b';');
        assert_eq!(options.quote_char_u8(), b'\'');
        assert_eq!(options.comment_u8(), Some(b'#'));
        assert!(options.trim_fields);
    }

    #[test]
    fn test_parser_options_validation() {
        assert!(CsvParserOptions::new().field_separator('§').validate().is_err());
        assert!(CsvParserOptions::new().quote_char(',').validate().is_err());
        assert!(CsvParserOptions::new().comment_character('€').validate().is_err());
        assert!(CsvParserOptions::new().field_separator('\t').validate().is_ok());
    }

    #[test]
    fn test_parser_options_deserialize_partial() {
        let options: CsvParserOptions =
            serde_json::from_str(r#"{"field_separator": ";", "skip_header": false}"#).unwrap();
        assert_eq!(options.field_separator, ';');
        assert!(!options.skip_header);
        assert_eq!(options.quote_char, '"');
    }

    #[test]
    fn test_reader_options_validation() {
        assert!(CsvReaderOptions::default().validate().is_ok());
        assert!(CsvReaderOptions::new(Vec::<String>::new()).validate().is_err());
        assert!(CsvReaderOptions::new([""]).validate().is_err());
    }

    #[test]
    fn test_split_lines_custom_terminator() {
        let options = CsvReaderOptions::new([";"]);
        assert_eq!(options.split_lines("Value1;B"), vec!["Value1", "B"]);
        assert_eq!(options.split_lines("a;;b;"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_split_lines_prefers_longest_terminator() {
        let options = CsvReaderOptions::default();
        assert_eq!(options.split_lines("a,b\r\nc,d\ne"), vec!["a,b", "c,d", "e"]);
    }

    #[test]
    fn test_split_lines_multibyte_content() {
        let options = CsvReaderOptions::new(["|"]);
        assert_eq!(options.split_lines("ä,ö|ü"), vec!["ä,ö", "ü"]);
    }
}
