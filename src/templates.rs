use std::collections::HashMap;

use chrono::{DateTime, Local};
use tera::Tera;

use crate::error::AppError;

/// Initialize the Tera template engine from `templates_dir`
pub fn init_templates(templates_dir: &str) -> Result<Tera, AppError> {
    let glob = format!("{}/**/*.html", templates_dir.trim_end_matches('/'));
    let mut tera = Tera::new(&glob)?;

    tera.register_filter("clock_time", clock_time_filter);

    Ok(tera)
}

/// Render an ISO-8601 timestamp as a local wall-clock time, e.g. "9:30:12 AM".
///
/// Unparseable input is returned unchanged.
fn clock_time_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let date_str = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("clock_time filter expects a string"))?;

    Ok(tera::Value::String(clock_time(date_str)))
}

fn clock_time(date_str: &str) -> String {
    match DateTime::parse_from_rfc3339(date_str) {
        Ok(date) => date
            .with_timezone(&Local)
            .format("%-I:%M:%S %p")
            .to_string(),
        Err(_) => date_str.to_string(),
    }
}
