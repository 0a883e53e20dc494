use super::{CatalogError, REQUIRED_COLUMNS};
use crate::schemes::domain::{Scheme, SchemeId};
use csv::StringRecord;
use std::collections::HashMap;
use std::io::Read;

pub(crate) fn parse_schemes<R: Read>(reader: R) -> Result<Vec<Scheme>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnIndex::from_headers(csv_reader.headers()?)?;
    let mut schemes = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        schemes.push(columns.scheme(&record));
    }

    Ok(schemes)
}

/// Maps each required column name to its position in the header row.
struct ColumnIndex {
    positions: HashMap<&'static str, usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, CatalogError> {
        let names: Vec<&str> = headers
            .iter()
            .map(|name| name.trim_start_matches('\u{feff}').trim())
            .collect();

        let mut positions = HashMap::new();
        let mut missing = Vec::new();
        for column in REQUIRED_COLUMNS {
            match names.iter().position(|name| *name == column) {
                Some(index) => {
                    positions.insert(column, index);
                }
                None => missing.push(column.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(Self { positions })
        } else {
            Err(CatalogError::SchemaValidation { missing })
        }
    }

    fn cell<'r>(&self, record: &'r StringRecord, column: &'static str) -> &'r str {
        self.positions
            .get(column)
            .and_then(|index| record.get(*index))
            .unwrap_or("")
    }

    fn text(&self, record: &StringRecord, column: &'static str) -> String {
        self.cell(record, column).to_string()
    }

    fn scheme(&self, record: &StringRecord) -> Scheme {
        Scheme {
            scheme_id: SchemeId(self.text(record, "scheme_id")),
            scheme_name: self.text(record, "scheme_name"),
            benefits: self.text(record, "benefits"),
            min_age: parse_whole(self.cell(record, "min_age")),
            max_age: parse_whole(self.cell(record, "max_age")),
            min_land_holding: parse_decimal(self.cell(record, "min_land_holding")),
            max_land_holding: parse_decimal(self.cell(record, "max_land_holding")),
            income_limit: parse_decimal(self.cell(record, "income_limit")),
            farmer_type: non_empty(self.cell(record, "farmer_type")),
            state: non_empty(self.cell(record, "state")),
            crop_type: non_empty(self.cell(record, "crop_type")),
            category: non_empty(self.cell(record, "category")),
            gender: non_empty(self.cell(record, "gender")),
            other_conditions: self.text(record, "other_conditions"),
            steps_to_apply: self.text(record, "steps_to_apply"),
            official_url: self.text(record, "official_url"),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_decimal(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
}

/// Accepts `18` as well as spreadsheet-style `18.0`.
fn parse_whole(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Some(parsed);
    }

    parse_decimal(trimmed)
        .filter(|parsed| parsed.fract() == 0.0 && parsed.abs() < i64::MAX as f64)
        .map(|parsed| parsed as i64)
}
