//! Country and city record types.
//!
//! Records are plain immutable values created fresh from store rows for a
//! single report and discarded after rendering. Optional numeric fields are
//! `Option`, never a zero sentinel: a country with no recorded independence
//! year carries `None`, not `0`.

/// One country row of the `world` dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    /// Three-letter country code, unique within the store.
    pub code: String,
    pub name: String,
    pub continent: String,
    pub region: String,
    /// Surface area in square kilometers, non-negative.
    pub surface_area: f64,
    /// Year of independence; absent for non-independent territories.
    pub independence_year: Option<i64>,
    pub population: i64,
    pub life_expectancy: Option<f64>,
    pub gnp: Option<f64>,
    pub gnp_old: Option<f64>,
    pub local_name: String,
    pub government_form: String,
    pub head_of_state: String,
    /// Weak reference to the capital's city id. Never resolved or validated
    /// against the city collection; it may point at a city outside the
    /// current result set.
    pub capital_city_id: Option<i64>,
}

/// One city row, denormalized with its country's display name.
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    /// City id, unique within the store.
    pub id: i64,
    pub name: String,
    /// Display name of the owning country (not the raw country code).
    pub country_name: String,
    pub district: String,
    pub population: i64,
}
