//! Reading a seat status out of an availability payload.
//!
//! The availability API has answered in two shapes over time: `data` as a
//! list of per-date rows, or `data.availability` as that list. Rows name
//! their status field inconsistently. Everything here works on a raw
//! `serde_json::Value` so either shape can be read without failing the
//! whole payload on one unexpected field.

use chrono::NaiveDate;
use serde_json::Value;

use crate::domain::ProbeResult;

use super::status::is_bookable;

/// Date renderings seen in availability rows.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"];

/// Status field names for rows of a top-level `data` list.
const DATA_STATUS_FIELDS: [&str; 3] = ["current_status", "currentStatus", "status"];

/// Status field names for rows of a `data.availability` list.
const AVAILABILITY_STATUS_FIELDS: [&str; 2] = ["status", "currentStatus"];

/// Extract the status for `date` from a payload and interpret it.
///
/// Looks for the row whose date equals the requested one, falling back to
/// the first row when none matches. Payloads that carry no usable status
/// produce a non-bookable result with a short marker in place of a status.
pub fn read_status(payload: &Value, date: NaiveDate) -> ProbeResult {
    let Some(object) = payload.as_object() else {
        return ProbeResult::new(false, "INVALID_RESPONSE");
    };

    if let Some(error) = object.get("error") {
        let cause = match error {
            Value::String(s) => s.clone(),
            Value::Null => "unknown".to_string(),
            other => other.to_string(),
        };
        return ProbeResult::error(cause);
    }

    if object.get("status") == Some(&Value::Bool(false)) {
        return ProbeResult::new(false, "API_STATUS_FALSE");
    }

    let status = match object.get("data") {
        Some(Value::Array(rows)) => status_for_date(rows, date, &DATA_STATUS_FIELDS),
        Some(Value::Object(data)) => match data.get("availability") {
            Some(Value::Array(rows)) => status_for_date(rows, date, &AVAILABILITY_STATUS_FIELDS),
            _ => None,
        },
        _ => None,
    };

    match status {
        Some(status) => ProbeResult::new(is_bookable(&status), status),
        None => ProbeResult::new(false, "NO_DATA"),
    }
}

/// Status of the row matching `date`, else of the first row.
fn status_for_date(rows: &[Value], date: NaiveDate, fields: &[&str]) -> Option<String> {
    let dated = rows
        .iter()
        .filter(|row| row_date(row) == Some(date))
        .find_map(|row| row_status(row, fields));

    dated.or_else(|| rows.first().and_then(|row| row_status(row, fields)))
}

/// First non-empty status field of a row, trimmed.
fn row_status(row: &Value, fields: &[&str]) -> Option<String> {
    let row = row.as_object()?;
    fields.iter().find_map(|field| {
        let text = match row.get(*field)? {
            Value::String(s) => s.trim().to_string(),
            Value::Null | Value::Bool(false) => return None,
            other => other.to_string(),
        };
        (!text.is_empty()).then_some(text)
    })
}

/// Parsed `date` field of a row.
fn row_date(row: &Value) -> Option<NaiveDate> {
    let raw = row.get("date")?.as_str()?.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}
