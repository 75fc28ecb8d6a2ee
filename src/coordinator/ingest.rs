//! Validation and clamping of inbound sensor submissions

use thiserror::Error;
use url::form_urlencoded;

use crate::coordinator::store::ReadingStore;
use crate::models::Reading;

#[derive(Debug, Error, PartialEq)]
pub enum IngestError {
    #[error("missing field '{0}'")]
    Missing(&'static str),
    #[error("field '{field}' is not a number: '{value}'")]
    NotANumber { field: &'static str, value: String },
}

/// Limit distance glitches before they reach display and alert logic
pub fn clamp_distance(distance: f32, limit: f32) -> f32 {
    if distance > limit {
        limit
    } else {
        distance
    }
}

/// Decode a `temperature=..&distance=..` form body into a reading
pub fn parse_submission(body: &str, distance_limit: f32) -> Result<Reading, IngestError> {
    let mut temperature = None;
    let mut distance = None;

    for (key, value) in form_urlencoded::parse(body.as_bytes()) {
        match key.as_ref() {
            "temperature" => temperature = Some(value.into_owned()),
            "distance" => distance = Some(value.into_owned()),
            _ => {}
        }
    }

    let temperature = number("temperature", temperature)?;
    let distance = number("distance", distance)?;

    Ok(Reading {
        temperature,
        distance: clamp_distance(distance, distance_limit),
    })
}

fn number(field: &'static str, raw: Option<String>) -> Result<f32, IngestError> {
    let raw = raw.ok_or(IngestError::Missing(field))?;
    match raw.trim().parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(IngestError::NotANumber { field, value: raw }),
    }
}

/// Validate a submission and, only if it is well formed, write it to the store
pub fn ingest(store: &ReadingStore, body: &str, distance_limit: f32) -> Result<Reading, IngestError> {
    let reading = parse_submission(body, distance_limit)?;
    store.update(reading);
    Ok(reading)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: f32 = 300.0;

    #[test]
    fn accepts_both_fields_verbatim() {
        assert_eq!(
            parse_submission("temperature=38.5&distance=50", LIMIT),
            Ok(Reading {
                temperature: 38.5,
                distance: 50.0
            })
        );
        assert_eq!(
            parse_submission("distance=300&temperature=-1000&extra=1", LIMIT),
            Ok(Reading {
                temperature: -1000.0,
                distance: 300.0
            })
        );
    }

    #[test]
    fn clamps_distance_to_limit() {
        for raw in ["300.5", "400", "1e9"] {
            let body = format!("temperature=40&distance={}", raw);
            assert_eq!(parse_submission(&body, LIMIT).unwrap().distance, LIMIT);
        }
        assert_eq!(clamp_distance(-1.0, LIMIT), -1.0);
        assert_eq!(clamp_distance(clamp_distance(999.0, LIMIT), LIMIT), LIMIT);
    }

    #[test]
    fn rejects_missing_or_garbled_fields() {
        assert_eq!(
            parse_submission("distance=50", LIMIT),
            Err(IngestError::Missing("temperature"))
        );
        assert_eq!(
            parse_submission("temperature=40", LIMIT),
            Err(IngestError::Missing("distance"))
        );
        assert_eq!(parse_submission("", LIMIT), Err(IngestError::Missing("temperature")));
        assert_eq!(
            parse_submission("temperature=warm&distance=50", LIMIT),
            Err(IngestError::NotANumber {
                field: "temperature",
                value: "warm".to_string()
            })
        );
        assert!(parse_submission("temperature=NaN&distance=50", LIMIT).is_err());
    }

    #[test]
    fn rejected_submission_leaves_store_untouched() {
        let store = ReadingStore::new();
        ingest(&store, "temperature=38&distance=20", LIMIT).unwrap();
        let before = store.snapshot();

        assert!(ingest(&store, "temperature=99", LIMIT).is_err());
        assert_eq!(store.snapshot(), before);
    }
}
