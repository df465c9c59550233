use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Calendar year used both as CSV column key and as the selected year.
pub type Year = i32;

/// Year selected when the store is created.
pub const DEFAULT_YEAR: Year = 2006;

/// Name of the column holding the state name in every dataset.
pub const STATE_COLUMN: &str = "State";

// ---------------------------------------------------------------------------
// DatasetKind – which of the two raw datasets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DatasetKind {
    /// Share of adults holding a bachelor's degree or higher.
    Education,
    /// Personal income per capita.
    Income,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 2] = [DatasetKind::Education, DatasetKind::Income];

    pub fn label(self) -> &'static str {
        match self {
            DatasetKind::Education => "education",
            DatasetKind::Income => "income",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// StateRow – one row of a raw dataset
// ---------------------------------------------------------------------------

/// One state's row: the state name plus the raw text of every year column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateRow {
    pub state: String,
    /// year → raw cell text, exactly as read from the source.
    pub fields: BTreeMap<Year, String>,
}

impl StateRow {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style helper, mostly for tests and generated data.
    pub fn with_field(mut self, year: Year, raw: impl Into<String>) -> Self {
        self.fields.insert(year, raw.into());
        self
    }

    pub fn field(&self, year: Year) -> Option<&str> {
        self.fields.get(&year).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// YearTable – a complete raw dataset
// ---------------------------------------------------------------------------

/// A raw dataset in source order, with the set of year columns it carries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearTable {
    pub rows: Vec<StateRow>,
    pub years: BTreeSet<Year>,
}

impl YearTable {
    /// Build the year index from the given rows.
    pub fn from_rows(rows: Vec<StateRow>) -> Self {
        let years = rows
            .iter()
            .flat_map(|row| row.fields.keys().copied())
            .collect();
        YearTable { rows, years }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.state.as_str())
    }
}

// ---------------------------------------------------------------------------
// StateValue – one record of a derived view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct StateValue {
    pub state: String,
    pub value: f64,
}

/// Convert a raw cell to a number.
///
/// Blank cells count as `0.0`, `Infinity`/`-Infinity` as infinities and
/// unsigned `0x`/`0o`/`0b` literals as integers. Anything else that is not a
/// plain decimal number becomes `NaN`.
pub fn coerce_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(value) = parse_prefixed_integer(s) {
        return value;
    }
    // Rust's float parser also takes "inf" and "nan"; those are not numbers here.
    if s
        .bytes()
        .any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E')
    {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// `None` when `s` has no radix prefix, `NaN` when the digits are invalid.
fn parse_prefixed_integer(s: &str) -> Option<f64> {
    let radix = match s.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    // Accumulate in f64 so long literals round instead of overflowing.
    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    });
    Some(value.unwrap_or(f64::NAN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_plain_numbers() {
        assert_eq!(coerce_number("24.5"), 24.5);
        assert_eq!(coerce_number("  41234 "), 41234.0);
        assert_eq!(coerce_number("-3"), -3.0);
        assert_eq!(coerce_number("1e3"), 1000.0);
        assert_eq!(coerce_number(".5"), 0.5);
    }

    #[test]
    fn coerce_blank_is_zero() {
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("   "), 0.0);
    }

    #[test]
    fn coerce_garbage_is_nan() {
        assert!(coerce_number("n/a").is_nan());
        assert!(coerce_number("1,234").is_nan());
        assert!(coerce_number("inf").is_nan());
        assert!(coerce_number("NaN").is_nan());
        assert!(coerce_number("12abc").is_nan());
    }

    #[test]
    fn coerce_radix_prefixes() {
        assert_eq!(coerce_number("0x1A"), 26.0);
        assert_eq!(coerce_number("0X1a"), 26.0);
        assert_eq!(coerce_number("0b101"), 5.0);
        assert_eq!(coerce_number("0o7"), 7.0);
        assert_eq!(coerce_number(" 0xff "), 255.0);
    }

    #[test]
    fn coerce_bad_radix_literals_are_nan() {
        assert!(coerce_number("0x").is_nan());
        assert!(coerce_number("0b102").is_nan());
        assert!(coerce_number("-0x1A").is_nan());
        assert!(coerce_number("0x1.5").is_nan());
    }

    #[test]
    fn coerce_infinity() {
        assert_eq!(coerce_number("Infinity"), f64::INFINITY);
        assert_eq!(coerce_number("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn year_index_is_union_of_row_fields() {
        let table = YearTable::from_rows(vec![
            StateRow::new("Ohio").with_field(2006, "24.5").with_field(2007, "25.0"),
            StateRow::new("Texas").with_field(2006, "26.1").with_field(2010, "27.0"),
        ]);
        assert_eq!(table.years.iter().copied().collect::<Vec<_>>(), vec![2006, 2007, 2010]);
        assert_eq!(table.state_names().collect::<Vec<_>>(), vec!["Ohio", "Texas"]);
        assert_eq!(table.rows[1].field(2007), None);
    }
}
