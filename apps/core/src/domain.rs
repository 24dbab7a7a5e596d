use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Identifier of an institution. The backend may send either a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarkerId {
    Number(serde_json::Number),
    Text(String),
}

impl From<usize> for MarkerId {
    fn from(index: usize) -> Self {
        Self::Number(index.into())
    }
}

impl From<&str> for MarkerId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// One institution as returned by `GET /universities`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendRecord {
    #[serde(default)]
    pub id: Option<MarkerId>,
    #[serde(default)]
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

/// A point drawn on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayMarker {
    pub id: MarkerId,
    pub name: Option<String>,
    pub position: LatLon,
}

impl DisplayMarker {
    pub fn new(id: impl Into<MarkerId>, name: Option<&str>, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            name: name.map(str::to_string),
            position: LatLon::new(lat, lon),
        }
    }

    /// Builds a marker from the record at `index` of a response array.
    /// A record without an id takes its index instead.
    pub fn from_record(index: usize, record: BackendRecord) -> Self {
        Self {
            id: record.id.unwrap_or_else(|| MarkerId::from(index)),
            name: record.name,
            position: LatLon::new(record.lat, record.lon),
        }
    }

    /// Short label shown next to a marker.
    pub fn popup_title(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("University {}", self.id))
    }

    /// Heading of the detail panel.
    pub fn panel_title(&self) -> &str {
        self.name.as_deref().unwrap_or("University")
    }
}

pub fn display_markers(records: Vec<BackendRecord>) -> Vec<DisplayMarker> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| DisplayMarker::from_record(index, record))
        .collect()
}

/// Markers shown until the first non-empty fetch lands.
pub fn sample_markers() -> Vec<DisplayMarker> {
    vec![
        DisplayMarker::new(1_usize, Some("Sample University Toronto"), 43.6532, -79.3832),
        DisplayMarker::new(2_usize, Some("Sample University Montreal"), 45.5017, -73.5673),
        DisplayMarker::new(3_usize, Some("Sample University Vancouver"), 49.2827, -123.1207),
    ]
}

/// Body of `GET /health`. Only the truthiness of `ok` matters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub ok: Value,
}

impl HealthStatus {
    pub const fn healthy() -> Self {
        Self {
            ok: Value::Bool(true),
        }
    }

    pub fn is_ok(&self) -> bool {
        is_truthy(&self.ok)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendHealth {
    #[default]
    Loading,
    Ok,
    Fail,
}

impl BackendHealth {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Ok => "ok",
            Self::Fail => "fail",
        }
    }
}

impl fmt::Display for BackendHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_numeric_and_string_ids() {
        let records: Vec<BackendRecord> = serde_json::from_str(
            r#"[
                {"id": 7, "name": "A", "lat": 1.0, "lon": 2.0},
                {"id": "https://openalex.org/I1", "name": "B", "lat": 3.0, "lon": 4.0}
            ]"#,
        )
        .unwrap();

        assert_eq!(records[0].id, Some(MarkerId::Number(7.into())));
        assert_eq!(records[1].id, Some(MarkerId::from("https://openalex.org/I1")));
    }

    #[test]
    fn missing_id_defaults_to_array_index() {
        let records: Vec<BackendRecord> = serde_json::from_str(
            r#"[
                {"id": "x", "name": "A", "lat": 1.0, "lon": 2.0},
                {"name": "B", "lat": 3.0, "lon": 4.0},
                {"id": null, "lat": 5.0, "lon": 6.0}
            ]"#,
        )
        .unwrap();

        let markers = display_markers(records);
        assert_eq!(markers[0].id, MarkerId::from("x"));
        assert_eq!(markers[1].id, MarkerId::from(1_usize));
        assert_eq!(markers[2].id, MarkerId::from(2_usize));
        assert_eq!(markers[2].name, None);
        assert_eq!(markers[1].position, LatLon::new(3.0, 4.0));
    }

    #[test]
    fn record_without_coordinates_is_rejected() {
        let result = serde_json::from_str::<Vec<BackendRecord>>(r#"[{"id": 1, "name": "A"}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn titles_fall_back_when_name_missing() {
        let named = DisplayMarker::new(4_usize, Some("McGill"), 45.5, -73.6);
        let unnamed = DisplayMarker::new(9_usize, None, 0.0, 0.0);

        assert_eq!(named.popup_title(), "McGill");
        assert_eq!(named.panel_title(), "McGill");
        assert_eq!(unnamed.popup_title(), "University 9");
        assert_eq!(unnamed.panel_title(), "University");
    }

    #[test]
    fn health_truthiness_follows_json_rules() {
        let cases = [
            (r#"{"ok": true}"#, true),
            (r#"{"ok": false}"#, false),
            (r#"{"ok": 1}"#, true),
            (r#"{"ok": 0}"#, false),
            (r#"{"ok": "yes"}"#, true),
            (r#"{"ok": ""}"#, false),
            (r#"{"ok": null}"#, false),
            (r#"{"status": "up"}"#, false),
        ];

        for (body, expected) in cases {
            let status: HealthStatus = serde_json::from_str(body).unwrap();
            assert_eq!(status.is_ok(), expected, "body {body}");
        }
    }

    #[test]
    fn sample_markers_are_the_three_canadian_cities() {
        let samples = sample_markers();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[2].panel_title(), "Sample University Vancouver");
        assert_eq!(samples[0].position, LatLon::new(43.6532, -79.3832));
    }

    #[test]
    fn health_renders_lowercase() {
        assert_eq!(BackendHealth::default().to_string(), "loading");
        assert_eq!(BackendHealth::Fail.as_str(), "fail");
    }
}
