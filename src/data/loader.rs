use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};

use super::error::DatasetError;
use super::model::{StateRow, Year, YearTable, STATE_COLUMN};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a raw dataset from a CSV file on disk.
pub fn load_file(path: &Path) -> Result<YearTable> {
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_year_table(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;
    log::debug!(
        "read {} rows with years {:?} from {}",
        table.len(),
        table.years,
        path.display()
    );
    Ok(table)
}

/// Parse a by-state, by-year CSV table.
///
/// Layout:
/// ```text
/// State,2006,2007,...
/// Alabama,19.0,19.5,...
/// ```
/// The `State` column names the row; every header made only of digits is a
/// year column. Other columns are ignored. Records shorter than the header
/// get an empty cell for each missing year column. Blank lines produce no row.
pub fn parse_year_table<R: Read>(reader: R) -> Result<YearTable, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|source| DatasetError::Csv { record: 0, source })?
        .clone();

    // A repeated header is keyed by its last occurrence.
    let state_idx = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| *h == STATE_COLUMN)
        .map(|(idx, _)| idx)
        .last()
        .ok_or(DatasetError::MissingStateColumn)?;

    let mut year_columns: BTreeMap<Year, usize> = BTreeMap::new();
    for (idx, header) in headers.iter().enumerate() {
        if idx == state_idx {
            continue;
        }
        match parse_year_header(header) {
            Some(year) => {
                year_columns.insert(year, idx);
            }
            None if header != STATE_COLUMN => {
                log::debug!("ignoring non-year column '{header}'");
            }
            None => {}
        }
    }

    let mut rows = Vec::new();
    for (record_no, result) in reader.records().enumerate() {
        let record = result.map_err(|source| DatasetError::Csv {
            record: record_no + 1,
            source,
        })?;

        let mut row = StateRow::new(record.get(state_idx).unwrap_or(""));
        for (&year, &idx) in &year_columns {
            row.fields
                .insert(year, record.get(idx).unwrap_or("").to_string());
        }
        rows.push(row);
    }

    Ok(YearTable::from_rows(rows))
}

fn parse_year_header(header: &str) -> Option<Year> {
    if header.is_empty() || !header.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    header.parse().ok()
}
