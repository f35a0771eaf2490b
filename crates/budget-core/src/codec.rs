//! Line-oriented field codec shared by every record type.
//!
//! A record is one line of `:`-separated fields. Backslash escapes keep
//! free text (names containing `:` or newlines) on a single line.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

pub const DELIMITER: char = ':';

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A field that could not be read from a line.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct FieldError(pub String);

pub type FieldResult<T> = std::result::Result<T, FieldError>;

/// The ordered fields of one on-disk line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fields {
    values: Vec<String>,
}

impl Fields {
    /// Split a raw line into unescaped fields.
    pub fn parse(line: &str) -> Self {
        let mut values = Vec::new();
        let mut current = String::new();
        let mut chars = line.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some('n') => current.push('\n'),
                    Some(next) => current.push(next),
                    None => current.push('\\'),
                },
                DELIMITER => values.push(std::mem::take(&mut current)),
                other => current.push(other),
            }
        }
        values.push(current);
        Self { values }
    }

    pub fn from_values(values: Vec<String>) -> Self {
        Self { values }
    }

    /// Render the fields back into a single line, without the trailing newline.
    pub fn to_line(&self) -> String {
        self.values
            .iter()
            .map(|value| escape(value))
            .collect::<Vec<_>>()
            .join(":")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn push(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
    }

    /// Replace the field at `index`.
    pub fn set(&mut self, index: usize, value: impl Into<String>) -> FieldResult<()> {
        let slot = self
            .values
            .get_mut(index)
            .ok_or_else(|| FieldError(format!("missing field {}", index)))?;
        *slot = value.into();
        Ok(())
    }

    pub fn expect_len(&self, expected: usize) -> FieldResult<()> {
        if self.values.len() != expected {
            return Err(FieldError(format!(
                "expected {} fields, got {}",
                expected,
                self.values.len()
            )));
        }
        Ok(())
    }

    pub fn text(&self, index: usize) -> FieldResult<String> {
        self.raw(index).map(str::to_string)
    }

    pub fn number<T: FromStr>(&self, index: usize) -> FieldResult<T> {
        let raw = self.raw(index)?;
        raw.parse()
            .map_err(|_| FieldError(format!("field {}: invalid number \"{}\"", index, raw)))
    }

    pub fn date(&self, index: usize) -> FieldResult<NaiveDate> {
        let raw = self.raw(index)?;
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|_| FieldError(format!("field {}: invalid date \"{}\"", index, raw)))
    }

    pub fn amount(&self, index: usize) -> FieldResult<Decimal> {
        let raw = self.raw(index)?;
        Decimal::from_str(raw)
            .map_err(|_| FieldError(format!("field {}: invalid amount \"{}\"", index, raw)))
    }

    pub fn flag(&self, index: usize) -> FieldResult<bool> {
        match self.raw(index)? {
            "0" => Ok(false),
            "1" => Ok(true),
            other => Err(FieldError(format!(
                "field {}: invalid flag \"{}\" (expected 0 or 1)",
                index, other
            ))),
        }
    }

    fn raw(&self, index: usize) -> FieldResult<&str> {
        self.values
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| FieldError(format!("missing field {}", index)))
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_flag(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            DELIMITER => out.push_str("\\:"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_line() {
        let fields = Fields::parse("3:abc:Rent:1000.00");
        assert_eq!(fields.values(), ["3", "abc", "Rent", "1000.00"]);
    }

    #[test]
    fn test_escaped_delimiter_survives() {
        let fields = Fields::from_values(vec!["1".into(), "Rent: flat 2\\b".into()]);
        let line = fields.to_line();
        assert_eq!(line, "1:Rent\\: flat 2\\\\b");
        assert_eq!(Fields::parse(&line), fields);
    }

    #[test]
    fn test_newline_is_escaped() {
        let fields = Fields::from_values(vec!["two\nlines".into()]);
        assert!(!fields.to_line().contains('\n'));
        assert_eq!(Fields::parse(&fields.to_line()), fields);
    }

    #[test]
    fn test_trailing_empty_field_is_kept() {
        assert_eq!(Fields::parse("a:").values(), ["a", ""]);
    }

    #[test]
    fn test_typed_accessors() {
        let fields = Fields::parse("7:2023-04-01:12.50:1");
        assert_eq!(fields.number::<u64>(0).unwrap(), 7);
        assert_eq!(
            fields.date(1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 4, 1).unwrap()
        );
        assert_eq!(fields.amount(2).unwrap(), Decimal::new(1250, 2));
        assert!(fields.flag(3).unwrap());
    }

    #[test]
    fn test_typed_accessors_reject_garbage() {
        let fields = Fields::parse("x:2023-02-30:ten:yes");
        assert!(fields.number::<u64>(0).is_err());
        assert!(fields.date(1).is_err());
        assert!(fields.amount(2).is_err());
        assert!(fields.flag(3).is_err());
        assert!(fields.text(4).is_err());
    }

    #[test]
    fn test_expect_len() {
        let fields = Fields::parse("a:b:c");
        assert!(fields.expect_len(3).is_ok());
        assert_eq!(
            fields.expect_len(4),
            Err(FieldError("expected 4 fields, got 3".to_string()))
        );
    }
}
