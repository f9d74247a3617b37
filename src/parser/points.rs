//! Parser for the `Points` column
//!
//! The column holds parenthesized `lat, lon` pairs separated by commas:
//! `(47.3769, 8.5417),(47.3771, 8.5420)`. Pair order is travel order and is
//! kept as-is.

use crate::types::Coordinate;

/// Longest snippet of offending input quoted in an error message
const PREVIEW_LEN: usize = 24;

/// Parse a `Points` column into coordinates.
///
/// On failure the error string describes what was wrong; the caller attaches
/// the row number.
pub fn parse_points(text: &str) -> Result<Vec<Coordinate>, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("no coordinate pairs".to_string());
    }

    // A lone pair is sometimes written without parentheses
    if !trimmed.contains('(') {
        return parse_pair(trimmed).map(|c| vec![c]);
    }

    let mut points = Vec::new();
    let mut rest = trimmed;
    while !rest.is_empty() {
        let inner = rest
            .strip_prefix('(')
            .ok_or_else(|| format!("expected '(' at '{}'", preview(rest)))?;
        let close = inner
            .find(')')
            .ok_or_else(|| format!("unterminated pair at '{}'", preview(rest)))?;

        points.push(parse_pair(&inner[..close])?);

        rest = inner[close + 1..].trim_start();
        if let Some(after) = rest.strip_prefix(',') {
            rest = after.trim_start();
            if rest.is_empty() {
                return Err("trailing ',' after last pair".to_string());
            }
        } else if !rest.is_empty() {
            return Err(format!("unexpected text '{}'", preview(rest)));
        }
    }

    Ok(points)
}

/// Parse `lat, lon`
fn parse_pair(pair: &str) -> Result<Coordinate, String> {
    let mut parts = pair.split(',').map(str::trim);
    let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("'({pair})' is not a latitude/longitude pair"));
    };

    Ok(Coordinate::new(parse_number(lat)?, parse_number(lon)?))
}

fn parse_number(text: &str) -> Result<f64, String> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(format!("'{text}' is not a number")),
    }
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_LEN).collect()
}
