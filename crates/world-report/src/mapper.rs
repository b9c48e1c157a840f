//! Row-to-record mapping driven by per-entity column tables.
//!
//! Each entity declares its column list once: name, coercion kind, and
//! whether the column is required. The query builder derives the SELECT
//! list from the same table, the store decodes each row against the
//! declared kinds, and this module turns the decoded row into a typed
//! record. A required column that is missing, NULL, or of the wrong kind
//! fails the current report with a `Mapping` error; optional columns map
//! NULL to `None`.

use crate::error::{ReportError, Result};
use crate::model::{City, Country};
use crate::value::SqlValue;

/// Declared coercion for a result column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Int,
    Float,
}

impl ColumnKind {
    pub(crate) fn name(self) -> &'static str {
        match self {
            ColumnKind::Text => "text",
            ColumnKind::Int => "integer",
            ColumnKind::Float => "float",
        }
    }
}

/// One column of an entity's result shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Source table qualifier, needed where a join makes bare names ambiguous.
    pub table: Option<&'static str>,
    /// Column name in the store.
    pub name: &'static str,
    pub kind: ColumnKind,
    /// Required columns must be present and non-NULL in every row.
    pub required: bool,
}

const fn col(name: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec {
        table: None,
        name,
        kind,
        required: true,
    }
}

const fn col_opt(name: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec {
        table: None,
        name,
        kind,
        required: false,
    }
}

const fn qualified(table: &'static str, name: &'static str, kind: ColumnKind) -> ColumnSpec {
    ColumnSpec {
        table: Some(table),
        name,
        kind,
        required: true,
    }
}

/// Result shape of a country report, in SELECT order.
pub const COUNTRY_COLUMNS: &[ColumnSpec] = &[
    col("Code", ColumnKind::Text),
    col("Name", ColumnKind::Text),
    col("Continent", ColumnKind::Text),
    col("Region", ColumnKind::Text),
    col("SurfaceArea", ColumnKind::Float),
    col_opt("IndepYear", ColumnKind::Int),
    col("Population", ColumnKind::Int),
    col_opt("LifeExpectancy", ColumnKind::Float),
    col_opt("GNP", ColumnKind::Float),
    col_opt("GNPOld", ColumnKind::Float),
    col("LocalName", ColumnKind::Text),
    col("GovernmentForm", ColumnKind::Text),
    col("HeadOfState", ColumnKind::Text),
    col_opt("Capital", ColumnKind::Int),
];

/// Result shape of a city report, in SELECT order. The country name comes
/// from the joined `country` row, so both tables must be qualified.
pub const CITY_COLUMNS: &[ColumnSpec] = &[
    qualified("city", "ID", ColumnKind::Int),
    qualified("city", "Name", ColumnKind::Text),
    qualified("country", "Name", ColumnKind::Text),
    qualified("city", "District", ColumnKind::Text),
    qualified("city", "Population", ColumnKind::Int),
];

/// Map one decoded row into a [`Country`].
pub fn map_country(row: &[SqlValue]) -> Result<Country> {
    let cols = COUNTRY_COLUMNS;
    check_width(row, cols)?;
    Ok(Country {
        code: req_text(cols, row, 0)?,
        name: req_text(cols, row, 1)?,
        continent: req_text(cols, row, 2)?,
        region: req_text(cols, row, 3)?,
        surface_area: req_float(cols, row, 4)?,
        independence_year: opt_int(cols, row, 5)?,
        population: req_int(cols, row, 6)?,
        life_expectancy: opt_float(cols, row, 7)?,
        gnp: opt_float(cols, row, 8)?,
        gnp_old: opt_float(cols, row, 9)?,
        local_name: req_text(cols, row, 10)?,
        government_form: req_text(cols, row, 11)?,
        head_of_state: req_text(cols, row, 12)?,
        capital_city_id: opt_int(cols, row, 13)?,
    })
}

/// Map one decoded row into a [`City`].
pub fn map_city(row: &[SqlValue]) -> Result<City> {
    let cols = CITY_COLUMNS;
    check_width(row, cols)?;
    Ok(City {
        id: req_int(cols, row, 0)?,
        name: req_text(cols, row, 1)?,
        country_name: req_text(cols, row, 2)?,
        district: req_text(cols, row, 3)?,
        population: req_int(cols, row, 4)?,
    })
}

fn check_width(row: &[SqlValue], columns: &[ColumnSpec]) -> Result<()> {
    if row.len() != columns.len() {
        return Err(ReportError::mapping(
            "<row>",
            format!("expected {} columns, found {}", columns.len(), row.len()),
        ));
    }
    Ok(())
}

fn wrong_kind(spec: &ColumnSpec, value: &SqlValue) -> ReportError {
    ReportError::mapping(
        spec.name,
        format!("expected {}, found {}", spec.kind.name(), value.kind_name()),
    )
}

fn required_value<'a>(spec: &ColumnSpec, row: &'a [SqlValue], idx: usize) -> Result<&'a SqlValue> {
    let value = &row[idx];
    if value.is_null() {
        return Err(ReportError::mapping(spec.name, "required column is NULL"));
    }
    Ok(value)
}

fn req_text(columns: &[ColumnSpec], row: &[SqlValue], idx: usize) -> Result<String> {
    let spec = &columns[idx];
    let value = required_value(spec, row, idx)?;
    value
        .as_text()
        .map(str::to_string)
        .ok_or_else(|| wrong_kind(spec, value))
}

fn req_int(columns: &[ColumnSpec], row: &[SqlValue], idx: usize) -> Result<i64> {
    let spec = &columns[idx];
    let value = required_value(spec, row, idx)?;
    value.as_int().ok_or_else(|| wrong_kind(spec, value))
}

fn req_float(columns: &[ColumnSpec], row: &[SqlValue], idx: usize) -> Result<f64> {
    let spec = &columns[idx];
    let value = required_value(spec, row, idx)?;
    value.as_float().ok_or_else(|| wrong_kind(spec, value))
}

fn opt_int(columns: &[ColumnSpec], row: &[SqlValue], idx: usize) -> Result<Option<i64>> {
    let spec = &columns[idx];
    let value = &row[idx];
    if value.is_null() {
        return Ok(None);
    }
    value
        .as_int()
        .map(Some)
        .ok_or_else(|| wrong_kind(spec, value))
}

fn opt_float(columns: &[ColumnSpec], row: &[SqlValue], idx: usize) -> Result<Option<f64>> {
    let spec = &columns[idx];
    let value = &row[idx];
    if value.is_null() {
        return Ok(None);
    }
    value
        .as_float()
        .map(Some)
        .ok_or_else(|| wrong_kind(spec, value))
}
