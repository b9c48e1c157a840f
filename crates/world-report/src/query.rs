//! Report request to query descriptor translation.
//!
//! One parameterized builder covers every report operation: entity kind,
//! optional equality filter, optional row cap. Caller-supplied filter
//! values are always carried as bound `?` parameters and never written
//! into the SQL text. The row cap, by contrast, is an integer validated
//! here and formatted as a literal `LIMIT`, which MySQL accepts without
//! a placeholder.

use crate::error::{ReportError, Result};
use crate::mapper::{ColumnSpec, CITY_COLUMNS, COUNTRY_COLUMNS};

/// Which entity a report targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Country,
    City,
}

/// Equality filter applied to a report.
///
/// For cities the continent filter applies transitively through the joined
/// country row; a region filter on cities is not a defined operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Continent(String),
    Region(String),
}

impl Filter {
    fn value(&self) -> &str {
        match self {
            Filter::Continent(v) | Filter::Region(v) => v,
        }
    }
}

/// A single report request: entity, optional filter, optional row cap.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub entity: EntityKind,
    pub filter: Option<Filter>,
    pub limit: Option<i64>,
}

impl ReportRequest {
    /// Start an unfiltered, uncapped request for the given entity.
    pub fn new(entity: EntityKind) -> Self {
        Self {
            entity,
            filter: None,
            limit: None,
        }
    }

    /// Add an equality filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Cap the result at the N highest-population rows.
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Executable query shape: SQL text, bound parameters, and the column
/// table the store uses to decode each row.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescriptor {
    pub sql: String,
    /// Positional values for the `?` placeholders in `sql`.
    pub params: Vec<String>,
    pub columns: &'static [ColumnSpec],
}

/// Quote a MySQL identifier.
fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

fn select_expr(spec: &ColumnSpec) -> String {
    match spec.table {
        Some(table) => format!("{}.{}", quote_ident(table), quote_ident(spec.name)),
        None => quote_ident(spec.name),
    }
}

/// Build the query descriptor for a report request.
///
/// Errors with `InvalidRequest` if a cap is requested with n <= 0, if the
/// filter value is blank, or if a region filter is applied to cities.
pub fn build_query(request: &ReportRequest) -> Result<QueryDescriptor> {
    if let Some(limit) = request.limit {
        if limit <= 0 {
            return Err(ReportError::invalid(format!(
                "row cap must be positive, got {limit}"
            )));
        }
    }
    if let Some(filter) = &request.filter {
        if filter.value().trim().is_empty() {
            return Err(ReportError::invalid("filter value must not be empty"));
        }
    }

    let columns = match request.entity {
        EntityKind::Country => COUNTRY_COLUMNS,
        EntityKind::City => CITY_COLUMNS,
    };

    let col_list = columns
        .iter()
        .map(select_expr)
        .collect::<Vec<_>>()
        .join(", ");

    let mut sql = match request.entity {
        EntityKind::Country => format!("SELECT {} FROM {}", col_list, quote_ident("country")),
        EntityKind::City => format!(
            "SELECT {} FROM {} JOIN {} ON {}.{} = {}.{}",
            col_list,
            quote_ident("city"),
            quote_ident("country"),
            quote_ident("city"),
            quote_ident("CountryCode"),
            quote_ident("country"),
            quote_ident("Code"),
        ),
    };

    let mut params = Vec::new();

    if let Some(filter) = &request.filter {
        let predicate = match (request.entity, filter) {
            (EntityKind::Country, Filter::Continent(_)) => {
                format!("{} = ?", quote_ident("Continent"))
            }
            (EntityKind::Country, Filter::Region(_)) => {
                format!("{} = ?", quote_ident("Region"))
            }
            (EntityKind::City, Filter::Continent(_)) => format!(
                "{}.{} = ?",
                quote_ident("country"),
                quote_ident("Continent")
            ),
            (EntityKind::City, Filter::Region(_)) => {
                return Err(ReportError::invalid(
                    "cities can only be filtered by continent",
                ));
            }
        };
        sql.push_str(" WHERE ");
        sql.push_str(&predicate);
        params.push(filter.value().to_string());
    }

    // Population descending with an identifier tie-break keeps every
    // listing reproducible across runs.
    match request.entity {
        EntityKind::Country => {
            sql.push_str(&format!(
                " ORDER BY {} DESC, {} ASC",
                quote_ident("Population"),
                quote_ident("Code")
            ));
        }
        EntityKind::City => {
            sql.push_str(&format!(
                " ORDER BY {}.{} DESC, {}.{} ASC",
                quote_ident("city"),
                quote_ident("Population"),
                quote_ident("city"),
                quote_ident("ID")
            ));
        }
    }

    if let Some(limit) = request.limit {
        sql.push_str(&format!(" LIMIT {limit}"));
    }

    Ok(QueryDescriptor {
        sql,
        params,
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_countries_shape() {
        let desc = build_query(&ReportRequest::new(EntityKind::Country)).unwrap();
        assert!(desc.sql.starts_with("SELECT `Code`, `Name`, `Continent`"));
        assert!(desc.sql.contains("FROM `country`"));
        assert!(desc.sql.ends_with("ORDER BY `Population` DESC, `Code` ASC"));
        assert!(!desc.sql.contains("WHERE"));
        assert!(!desc.sql.contains("LIMIT"));
        assert!(desc.params.is_empty());
        assert_eq!(desc.columns.len(), 14);
    }

    #[test]
    fn test_same_request_builds_equal_descriptor() {
        let request = ReportRequest::new(EntityKind::Country)
            .with_filter(Filter::Continent("Europe".to_string()))
            .with_limit(10);
        assert_eq!(build_query(&request).unwrap(), build_query(&request).unwrap());
    }

    #[test]
    fn test_filter_value_is_bound_not_interpolated() {
        let request = ReportRequest::new(EntityKind::Country)
            .with_filter(Filter::Continent("Europe' OR '1'='1".to_string()));
        let desc = build_query(&request).unwrap();
        assert!(desc.sql.contains("WHERE `Continent` = ?"));
        assert!(!desc.sql.contains("Europe"));
        assert_eq!(desc.params, vec!["Europe' OR '1'='1".to_string()]);
    }

    #[test]
    fn test_region_filter_uses_region_column() {
        let request = ReportRequest::new(EntityKind::Country)
            .with_filter(Filter::Region("Southeast Asia".to_string()));
        let desc = build_query(&request).unwrap();
        assert!(desc.sql.contains("WHERE `Region` = ?"));
        assert_eq!(desc.params, vec!["Southeast Asia".to_string()]);
    }

    #[test]
    fn test_capped_request_appends_limit() {
        let request = ReportRequest::new(EntityKind::Country).with_limit(10);
        let desc = build_query(&request).unwrap();
        assert!(desc.sql.ends_with("LIMIT 10"));
    }

    #[test]
    fn test_nonpositive_cap_rejected() {
        for limit in [0, -1, -10] {
            let request = ReportRequest::new(EntityKind::Country).with_limit(limit);
            let err = build_query(&request).unwrap_err();
            assert!(matches!(err, ReportError::InvalidRequest(_)));
        }
    }

    #[test]
    fn test_blank_filter_rejected() {
        let request =
            ReportRequest::new(EntityKind::Country).with_filter(Filter::Continent("  ".into()));
        assert!(matches!(
            build_query(&request),
            Err(ReportError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_city_query_joins_country() {
        let desc = build_query(&ReportRequest::new(EntityKind::City)).unwrap();
        assert!(desc
            .sql
            .contains("JOIN `country` ON `city`.`CountryCode` = `country`.`Code`"));
        assert!(desc
            .sql
            .ends_with("ORDER BY `city`.`Population` DESC, `city`.`ID` ASC"));
        assert_eq!(desc.columns.len(), 5);
    }

    #[test]
    fn test_city_continent_filter_goes_through_country() {
        let request = ReportRequest::new(EntityKind::City)
            .with_filter(Filter::Continent("Europe".to_string()));
        let desc = build_query(&request).unwrap();
        assert!(desc.sql.contains("WHERE `country`.`Continent` = ?"));
        assert_eq!(desc.params, vec!["Europe".to_string()]);
    }

    #[test]
    fn test_city_region_filter_rejected() {
        let request =
            ReportRequest::new(EntityKind::City).with_filter(Filter::Region("Caribbean".into()));
        assert!(matches!(
            build_query(&request),
            Err(ReportError::InvalidRequest(_))
        ));
    }
}
