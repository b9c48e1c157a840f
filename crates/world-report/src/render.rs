//! Fixed-width text table rendering.
//!
//! Pure formatting: given the same ordered records, the output is
//! byte-identical. No filtering or sorting happens here. Column widths
//! match the classic report layout; populations carry comma grouping
//! separators (en-US convention). An absent capital renders as an empty
//! cell, never as `0`.

use std::fmt::Write;

use crate::model::{City, Country};

/// Render countries as a table: Code, Name, Continent, Region,
/// Population, Capital.
pub fn render_countries(countries: &[Country]) -> String {
    let mut out = String::new();
    push_country_row(
        &mut out,
        "Code",
        "Name",
        "Continent",
        "Region",
        "Population",
        "Capital",
    );
    for country in countries {
        let capital = country
            .capital_city_id
            .map(|id| id.to_string())
            .unwrap_or_default();
        push_country_row(
            &mut out,
            &country.code,
            &country.name,
            &country.continent,
            &country.region,
            &group_thousands(country.population),
            &capital,
        );
    }
    out
}

/// Render cities as a table: Name, CountryName, District, Population.
pub fn render_cities(cities: &[City]) -> String {
    let mut out = String::new();
    push_city_row(&mut out, "Name", "CountryName", "District", "Population");
    for city in cities {
        push_city_row(
            &mut out,
            &city.name,
            &city.country_name,
            &city.district,
            &group_thousands(city.population),
        );
    }
    out
}

fn push_country_row(
    out: &mut String,
    code: &str,
    name: &str,
    continent: &str,
    region: &str,
    population: &str,
    capital: &str,
) {
    let _ = writeln!(
        out,
        "{code:<5} {name:<50} {continent:<15} {region:<40} {population:<15} {capital:<10}"
    );
}

fn push_city_row(out: &mut String, name: &str, country: &str, district: &str, population: &str) {
    let _ = writeln!(out, "{name:<40} {country:<40} {district:<30} {population:<15}");
}

/// Format a non-negative population with comma grouping separators.
fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    let first_group = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - first_group) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
