//! Report operations.
//!
//! [`ReportService`] composes the pipeline for every read operation:
//! build the request, translate it to a query descriptor, execute it
//! through the injected store, and map the rows into records. Each call
//! is independent; no state is shared between report invocations.

use tracing::debug;

use crate::error::Result;
use crate::mapper;
use crate::model::{City, Country};
use crate::query::{self, EntityKind, Filter, ReportRequest};
use crate::store::ReportStore;

/// The report operations, generic over the data-access collaborator.
pub struct ReportService<S> {
    store: S,
}

impl<S: ReportStore> ReportService<S> {
    /// Create a service over an already-connected store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// All countries, population descending.
    pub async fn all_countries(&self) -> Result<Vec<Country>> {
        self.countries(ReportRequest::new(EntityKind::Country)).await
    }

    /// Countries in a continent, population descending.
    pub async fn countries_by_continent(&self, continent: &str) -> Result<Vec<Country>> {
        self.countries(
            ReportRequest::new(EntityKind::Country)
                .with_filter(Filter::Continent(continent.to_string())),
        )
        .await
    }

    /// Countries in a region, population descending.
    pub async fn countries_by_region(&self, region: &str) -> Result<Vec<Country>> {
        self.countries(
            ReportRequest::new(EntityKind::Country).with_filter(Filter::Region(region.to_string())),
        )
        .await
    }

    /// The N most populous countries globally.
    ///
    /// Returns min(n, available) records; n <= 0 is `InvalidRequest`.
    pub async fn top_countries(&self, n: i64) -> Result<Vec<Country>> {
        self.countries(ReportRequest::new(EntityKind::Country).with_limit(n))
            .await
    }

    /// The N most populous countries in a continent.
    pub async fn top_countries_in_continent(&self, n: i64, continent: &str) -> Result<Vec<Country>> {
        self.countries(
            ReportRequest::new(EntityKind::Country)
                .with_filter(Filter::Continent(continent.to_string()))
                .with_limit(n),
        )
        .await
    }

    /// The N most populous countries in a region.
    pub async fn top_countries_in_region(&self, n: i64, region: &str) -> Result<Vec<Country>> {
        self.countries(
            ReportRequest::new(EntityKind::Country)
                .with_filter(Filter::Region(region.to_string()))
                .with_limit(n),
        )
        .await
    }

    /// All cities with their country's display name, population descending.
    pub async fn all_cities(&self) -> Result<Vec<City>> {
        self.cities(ReportRequest::new(EntityKind::City)).await
    }

    /// Cities in a continent (through the country relation),
    /// population descending.
    pub async fn cities_by_continent(&self, continent: &str) -> Result<Vec<City>> {
        self.cities(
            ReportRequest::new(EntityKind::City)
                .with_filter(Filter::Continent(continent.to_string())),
        )
        .await
    }

    async fn countries(&self, request: ReportRequest) -> Result<Vec<Country>> {
        let descriptor = query::build_query(&request)?;
        let rows = self.store.fetch(&descriptor).await?;
        let countries = rows
            .iter()
            .map(|row| mapper::map_country(row))
            .collect::<Result<Vec<_>>>()?;
        debug!("Country report produced {} records", countries.len());
        Ok(countries)
    }

    async fn cities(&self, request: ReportRequest) -> Result<Vec<City>> {
        let descriptor = query::build_query(&request)?;
        let rows = self.store.fetch(&descriptor).await?;
        let cities = rows
            .iter()
            .map(|row| mapper::map_city(row))
            .collect::<Result<Vec<_>>>()?;
        debug!("City report produced {} records", cities.len());
        Ok(cities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use crate::query::QueryDescriptor;
    use crate::value::SqlValue;
    use async_trait::async_trait;

    /// In-memory store that interprets the descriptor the way the MySQL
    /// store's database would: apply the bound filter, sort by population
    /// descending with identifier tie-break, then apply any LIMIT.
    struct FakeStore {
        /// Country rows in COUNTRY_COLUMNS order.
        countries: Vec<Vec<SqlValue>>,
        /// City rows in CITY_COLUMNS order, tagged with their continent
        /// (the join column is not part of the selected row).
        cities: Vec<(String, Vec<SqlValue>)>,
    }

    impl FakeStore {
        fn empty() -> Self {
            Self {
                countries: Vec::new(),
                cities: Vec::new(),
            }
        }

        fn with_countries(countries: Vec<Vec<SqlValue>>) -> Self {
            Self {
                countries,
                cities: Vec::new(),
            }
        }
    }

    fn text_at(row: &[SqlValue], idx: usize) -> String {
        row[idx].as_text().unwrap_or_default().to_string()
    }

    fn int_at(row: &[SqlValue], idx: usize) -> i64 {
        row[idx].as_int().unwrap_or(i64::MIN)
    }

    fn parse_limit(sql: &str) -> Option<usize> {
        sql.rsplit_once(" LIMIT ")
            .and_then(|(_, n)| n.parse().ok())
    }

    #[async_trait]
    impl ReportStore for FakeStore {
        async fn fetch(&self, query: &QueryDescriptor) -> crate::error::Result<Vec<Vec<SqlValue>>> {
            let is_city = query.columns.len() == 5;

            let mut rows: Vec<Vec<SqlValue>> = if is_city {
                self.cities
                    .iter()
                    .filter(|(continent, _)| match query.params.first() {
                        Some(filter) => continent == filter,
                        None => true,
                    })
                    .map(|(_, row)| row.clone())
                    .collect()
            } else {
                let filter_idx = if query.sql.contains("`Region` = ?") { 3 } else { 2 };
                self.countries
                    .iter()
                    .filter(|row| match query.params.first() {
                        Some(filter) => &text_at(row, filter_idx) == filter,
                        None => true,
                    })
                    .cloned()
                    .collect()
            };

            let (pop_idx, id_idx) = if is_city { (4, 0) } else { (6, 0) };
            rows.sort_by(|a, b| {
                int_at(b, pop_idx)
                    .cmp(&int_at(a, pop_idx))
                    .then_with(|| {
                        if is_city {
                            int_at(a, id_idx).cmp(&int_at(b, id_idx))
                        } else {
                            text_at(a, id_idx).cmp(&text_at(b, id_idx))
                        }
                    })
            });

            if let Some(limit) = parse_limit(&query.sql) {
                rows.truncate(limit);
            }

            Ok(rows)
        }
    }

    /// Store whose every fetch fails, as a lost connection would.
    struct BrokenStore;

    #[async_trait]
    impl ReportStore for BrokenStore {
        async fn fetch(&self, _query: &QueryDescriptor) -> crate::error::Result<Vec<Vec<SqlValue>>> {
            Err(ReportError::Query(sqlx::Error::PoolClosed))
        }
    }

    fn country_row(code: &str, continent: &str, region: &str, population: i64) -> Vec<SqlValue> {
        vec![
            code.into(),
            format!("Name of {code}").into(),
            continent.into(),
            region.into(),
            SqlValue::Float(1000.0),
            SqlValue::Int(1900),
            SqlValue::Int(population),
            SqlValue::Float(70.0),
            SqlValue::Null,
            SqlValue::Null,
            format!("Local {code}").into(),
            "Republic".into(),
            "Head of State".into(),
            SqlValue::Null,
        ]
    }

    fn city_row(id: i64, name: &str, country: &str, population: i64) -> Vec<SqlValue> {
        vec![
            SqlValue::Int(id),
            name.into(),
            country.into(),
            "District".into(),
            SqlValue::Int(population),
        ]
    }

    fn sample_store() -> FakeStore {
        FakeStore::with_countries(vec![
            country_row("AAA", "Europe", "Western Europe", 90),
            country_row("BBB", "Europe", "Western Europe", 50),
            country_row("CCC", "Asia", "Eastern Asia", 200),
            country_row("DDD", "Asia", "Southeast Asia", 200),
            country_row("EEE", "Oceania", "Polynesia", 10),
        ])
    }

    #[tokio::test]
    async fn test_all_countries_population_descending() {
        let service = ReportService::new(sample_store());
        let countries = service.all_countries().await.unwrap();
        assert_eq!(countries.len(), 5);
        for pair in countries.windows(2) {
            assert!(pair[0].population >= pair[1].population);
        }
    }

    #[tokio::test]
    async fn test_equal_populations_break_ties_by_code() {
        let service = ReportService::new(sample_store());
        let countries = service.all_countries().await.unwrap();
        // CCC and DDD both have population 200; CCC sorts first.
        assert_eq!(countries[0].code, "CCC");
        assert_eq!(countries[1].code, "DDD");
    }

    #[tokio::test]
    async fn test_countries_by_continent_only_matches() {
        let service = ReportService::new(sample_store());
        let countries = service.countries_by_continent("Europe").await.unwrap();
        assert_eq!(countries.len(), 2);
        assert!(countries.iter().all(|c| c.continent == "Europe"));
    }

    #[tokio::test]
    async fn test_countries_by_region() {
        let service = ReportService::new(sample_store());
        let countries = service.countries_by_region("Southeast Asia").await.unwrap();
        assert_eq!(countries.len(), 1);
        assert_eq!(countries[0].code, "DDD");
    }

    #[tokio::test]
    async fn test_top_countries_is_prefix_of_all() {
        let service = ReportService::new(sample_store());
        let all = service.all_countries().await.unwrap();
        let top = service.top_countries(3).await.unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!(top, all[..3].to_vec());
    }

    #[tokio::test]
    async fn test_top_countries_caps_at_available() {
        let service = ReportService::new(sample_store());
        let top = service.top_countries(100).await.unwrap();
        assert_eq!(top.len(), 5);
    }

    #[tokio::test]
    async fn test_top_countries_rejects_nonpositive_n() {
        let service = ReportService::new(sample_store());
        for n in [0, -1] {
            let err = service.top_countries(n).await.unwrap_err();
            assert!(matches!(err, ReportError::InvalidRequest(_)));
        }
    }

    #[tokio::test]
    async fn test_top_in_continent_scenario() {
        // Countries {A: 90 Europe}, {B: 50 Europe}, {C: 200 Asia}:
        // the single top country in Europe is A.
        let service = ReportService::new(FakeStore::with_countries(vec![
            country_row("A", "Europe", "Western Europe", 90),
            country_row("B", "Europe", "Western Europe", 50),
            country_row("C", "Asia", "Eastern Asia", 200),
        ]));
        let top = service.top_countries_in_continent(1, "Europe").await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].code, "A");
    }

    #[tokio::test]
    async fn test_top_in_region() {
        let service = ReportService::new(sample_store());
        let top = service.top_countries_in_region(5, "Western Europe").await.unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].code, "AAA");
    }

    #[tokio::test]
    async fn test_zero_match_filter_is_empty_not_error() {
        let service = ReportService::new(sample_store());
        let countries = service.countries_by_continent("Antarctica").await.unwrap();
        assert!(countries.is_empty());
    }

    #[tokio::test]
    async fn test_all_cities_on_empty_store() {
        let service = ReportService::new(FakeStore::empty());
        let cities = service.all_cities().await.unwrap();
        assert!(cities.is_empty());
    }

    #[tokio::test]
    async fn test_cities_by_continent_through_country_relation() {
        let mut store = FakeStore::empty();
        store.cities = vec![
            ("Europe".to_string(), city_row(1, "Paris", "France", 2_125_246)),
            ("Europe".to_string(), city_row(2, "Berlin", "Germany", 3_386_667)),
            ("Asia".to_string(), city_row(3, "Tokyo", "Japan", 7_980_230)),
        ];
        let service = ReportService::new(store);
        let cities = service.cities_by_continent("Europe").await.unwrap();
        assert_eq!(cities.len(), 2);
        assert_eq!(cities[0].name, "Berlin");
        assert_eq!(cities[1].name, "Paris");
    }

    #[tokio::test]
    async fn test_store_failure_is_error_not_empty_result() {
        let service = ReportService::new(BrokenStore);
        let err = service.all_countries().await.unwrap_err();
        assert!(matches!(err, ReportError::Query(_)));
        let err = service.all_cities().await.unwrap_err();
        assert!(matches!(err, ReportError::Query(_)));
    }

    #[tokio::test]
    async fn test_mapping_failure_aborts_report() {
        let mut bad_row = country_row("XXX", "Europe", "Western Europe", 1);
        bad_row[6] = SqlValue::Null; // Population
        let service = ReportService::new(FakeStore::with_countries(vec![bad_row]));
        let err = service.all_countries().await.unwrap_err();
        assert!(matches!(err, ReportError::Mapping { .. }));
    }
}
