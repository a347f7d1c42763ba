//! Terminal rendering of the starship table.
//!
//! One block per ship, fields in payload order. `created`/`edited` are shown
//! as dates, `pilots`/`films` are resolved to names through the catalog, and
//! `url` is shown as a link line.

use chrono::{DateTime, Datelike};
use serde_json::Value;
use shipdex_core::model::{Resource, Starship};
use shipdex_core::{Catalog, ManufacturerSelector};
use std::io::{self, Write};

pub fn render(
    out: &mut impl Write,
    catalog: &Catalog,
    selector: &ManufacturerSelector,
    ships: &[&Starship],
) -> io::Result<()> {
    writeln!(out, "{} Starships", selector)?;
    writeln!(out, "Results: {}", ships.len())?;
    for ship in ships {
        writeln!(out)?;
        render_ship(out, catalog, ship)?;
    }
    writeln!(out)?;
    Ok(())
}

fn render_ship(out: &mut impl Write, catalog: &Catalog, ship: &Starship) -> io::Result<()> {
    writeln!(out, "== {} ==", ship.name().unwrap_or(ship.url()))?;
    for (key, value) in ship.fields() {
        let label = column_label(key);
        match key.as_str() {
            "created" | "edited" => {
                let raw = value.as_str().unwrap_or_default();
                writeln!(out, "  {}: {}", label, format_timestamp(raw))?;
            }
            "url" => writeln!(out, "  {}: View at {}", label, ship.url())?,
            "pilots" => {
                let pilots: Vec<&Resource> = catalog.pilots_of(ship).collect();
                write_list(out, &label, &pilots, |i| format!("{}.", i + 1))?;
            }
            "films" => {
                let films: Vec<&Resource> = catalog.films_of(ship).collect();
                write_list(out, &label, &films, |_| "-".to_string())?;
            }
            _ => writeln!(out, "  {}: {}", label, scalar(value))?,
        }
    }
    Ok(())
}

fn write_list(
    out: &mut impl Write,
    label: &str,
    items: &[&Resource],
    marker: impl Fn(usize) -> String,
) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "  {}: -", label);
    }
    writeln!(out, "  {}:", label)?;
    for (i, item) in items.iter().enumerate() {
        writeln!(out, "    {} {} <{}>", marker(i), item.display_name(), item.url())?;
    }
    Ok(())
}

/// `cost_in_credits` -> `cost in credits`.
fn column_label(key: &str) -> String {
    key.replace('_', " ")
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(scalar).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

/// RFC 3339 timestamp as `Dec 10th 2014, 2:20:33 pm`; unparseable input is returned as-is.
pub fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => format!(
            "{} {}{} {}",
            dt.format("%b"),
            dt.day(),
            ordinal_suffix(dt.day()),
            dt.format("%Y, %-I:%M:%S %P")
        ),
        Err(_) => raw.to_string(),
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
