//! Field extraction — maps one provider record to a [`NormalizedRoute`].
//!
//! Providers do not agree on field names, so every field is looked up
//! through a [`FieldProbe`]: a fixed, ordered list of candidate keys where
//! the first usable value wins and later keys are never consulted.

use serde_json::{Map, Number, Value};

/// One provider-supplied JSON object before normalization.
pub type RawRecord = Map<String, Value>;

/// Prefix of the synthesized name used when a record carries none.
pub const NAME_FALLBACK_PREFIX: &str = "ruta_";

/// An ordered list of candidate keys for one logical field.
#[derive(Debug, Clone, Copy)]
pub struct FieldProbe {
    keys: &'static [&'static str],
}

pub const ID_PROBE: FieldProbe = FieldProbe::new(&["id", "_id", "route_id", "id_ruta"]);

pub const NAME_PROBE: FieldProbe =
    FieldProbe::new(&["name", "ruta", "descripcion", "description"]);

pub const SPEED_PROBE: FieldProbe =
    FieldProbe::new(&["avg_speed", "velocidad_media", "vel_media", "speed", "media_speed"]);

pub const DURATION_PROBE: FieldProbe =
    FieldProbe::new(&["avg_duration", "duracion_media", "tiempo_medio", "duration", "duracion"]);

impl FieldProbe {
    pub const fn new(keys: &'static [&'static str]) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &'static [&'static str] {
        self.keys
    }

    /// First value that is present and not `null`.
    pub fn first_present<'a>(&self, record: &'a RawRecord) -> Option<&'a Value> {
        self.keys
            .iter()
            .filter_map(|k| record.get(*k))
            .find(|v| !v.is_null())
    }

    /// First value that is present and numeric, coerced to `f64`.
    ///
    /// Keys holding non-numeric values are skipped, not treated as a miss.
    pub fn first_numeric(&self, record: &RawRecord) -> Option<f64> {
        self.keys
            .iter()
            .filter_map(|k| record.get(*k))
            .find_map(numeric_value)
    }
}

/// Schema-stable representation of one route.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRoute {
    pub id: Option<String>,
    pub name: String,
    pub speed: Option<f64>,
    pub duration: Option<f64>,
}

impl NormalizedRoute {
    /// The id as it appears in the log line; an absent id renders empty.
    pub fn id_str(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }
}

/// Normalize one record. Never fails: missing fields fall back to `None`
/// or, for the name, to `ruta_<id>`.
pub fn extract(record: &RawRecord) -> NormalizedRoute {
    let id = ID_PROBE.first_present(record).map(string_form);
    let name = match NAME_PROBE.first_present(record) {
        Some(v) => string_form(v),
        None => format!("{NAME_FALLBACK_PREFIX}{}", id.as_deref().unwrap_or("")),
    };

    NormalizedRoute {
        id,
        name,
        speed: SPEED_PROBE.first_numeric(record),
        duration: DURATION_PROBE.first_numeric(record),
    }
}

/// Numbers, and strings that read as a decimal number once surrounding
/// whitespace is removed.
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_str(s),
        _ => None,
    }
}

fn parse_numeric_str(s: &str) -> Option<f64> {
    let t = s.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C'));
    if t.is_empty() {
        return None;
    }
    // `f64::from_str` also accepts "inf" and "NaN", which are not numbers here.
    if !t
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return None;
    }
    t.parse::<f64>().ok()
}

/// Textual form of an id or name value.
pub fn string_form(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(true) => "1".into(),
        Value::Bool(false) => String::new(),
        Value::Number(n) => number_form(n),
        other => other.to_string(),
    }
}

fn number_form(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(format_metric).unwrap_or_else(|| n.to_string())
    }
}

/// Default float formatting, no rounding: `12.0` → `12`, `12.5` → `12.5`.
pub fn format_metric(value: f64) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(v: Value) -> RawRecord {
        match v {
            Value::Object(m) => m,
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn id_follows_key_priority() {
        let r = extract(&rec(json!({"id_ruta": "d", "_id": "b", "route_id": "c"})));
        assert_eq!(r.id.as_deref(), Some("b"));
    }

    #[test]
    fn route_id_beats_id_ruta() {
        let r = extract(&rec(json!({"id_ruta": "d", "route_id": "c"})));
        assert_eq!(r.id.as_deref(), Some("c"));
    }

    #[test]
    fn null_id_is_skipped_in_favor_of_next_key() {
        let r = extract(&rec(json!({"id": null, "_id": 7})));
        assert_eq!(r.id.as_deref(), Some("7"));
    }

    #[test]
    fn missing_id_is_none() {
        let r = extract(&rec(json!({"name": "A"})));
        assert!(r.id.is_none());
        assert_eq!(r.id_str(), "");
    }

    #[test]
    fn name_falls_back_to_ruta_prefix_with_id() {
        let r = extract(&rec(json!({"id": 42})));
        assert_eq!(r.name, "ruta_42");
    }

    #[test]
    fn name_fallback_survives_missing_id() {
        let r = extract(&rec(json!({})));
        assert_eq!(r.name, "ruta_");
    }

    #[test]
    fn name_prefers_earliest_key_even_when_empty() {
        let r = extract(&rec(json!({"name": "", "ruta": "Foo"})));
        assert_eq!(r.name, "");
    }

    #[test]
    fn ruta_beats_descripcion() {
        let r = extract(&rec(json!({"descripcion": "Gran Vía", "ruta": "R-7", "description": "Main"})));
        assert_eq!(r.name, "R-7");
    }

    #[test]
    fn spanish_name_keys_are_recognized() {
        let r = extract(&rec(json!({"descripcion": "Gran Vía", "description": "Main"})));
        assert_eq!(r.name, "Gran Vía");
    }

    #[test]
    fn speed_takes_first_matching_key_only() {
        let r = extract(&rec(json!({"speed": 99, "vel_media": 15, "avg_speed": null})));
        assert_eq!(r.speed, Some(15.0));
    }

    #[test]
    fn non_numeric_speed_key_is_skipped() {
        let r = extract(&rec(json!({"avg_speed": "n/a", "velocidad_media": "23.5"})));
        assert_eq!(r.speed, Some(23.5));
    }

    #[test]
    fn speed_and_duration_are_independent() {
        let r = extract(&rec(json!({"tiempo_medio": "30", "duracion": 45})));
        assert_eq!(r.speed, None);
        assert_eq!(r.duration, Some(30.0));
    }

    #[test]
    fn numeric_value_accepts_numbers_and_numeric_strings() {
        assert_eq!(numeric_value(&json!(12)), Some(12.0));
        assert_eq!(numeric_value(&json!(-3.25)), Some(-3.25));
        assert_eq!(numeric_value(&json!(" 7 ")), Some(7.0));
        assert_eq!(numeric_value(&json!("1e3")), Some(1000.0));
        assert_eq!(numeric_value(&json!(".5")), Some(0.5));
        assert_eq!(numeric_value(&json!("+4")), Some(4.0));
    }

    #[test]
    fn numeric_value_rejects_everything_else() {
        assert_eq!(numeric_value(&json!("")), None);
        assert_eq!(numeric_value(&json!("abc")), None);
        assert_eq!(numeric_value(&json!("inf")), None);
        assert_eq!(numeric_value(&json!("NaN")), None);
        assert_eq!(numeric_value(&json!("0x1A")), None);
        assert_eq!(numeric_value(&json!("12 km/h")), None);
        assert_eq!(numeric_value(&json!(true)), None);
        assert_eq!(numeric_value(&json!([1])), None);
        assert_eq!(numeric_value(&json!({"v": 1})), None);
        assert_eq!(numeric_value(&Value::Null), None);
    }

    #[test]
    fn string_form_of_scalars() {
        assert_eq!(string_form(&json!("x")), "x");
        assert_eq!(string_form(&json!(1)), "1");
        assert_eq!(string_form(&json!(12.0)), "12");
        assert_eq!(string_form(&json!(1.5)), "1.5");
        assert_eq!(string_form(&json!(true)), "1");
        assert_eq!(string_form(&json!(false)), "");
    }

    #[test]
    fn format_metric_has_no_trailing_zero_or_rounding() {
        assert_eq!(format_metric(12.0), "12");
        assert_eq!(format_metric(12.5), "12.5");
        assert_eq!(format_metric(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn key_lists_expose_their_order() {
        assert_eq!(SPEED_PROBE.keys()[0], "avg_speed");
        assert_eq!(DURATION_PROBE.keys().last(), Some(&"duracion"));
    }
}
