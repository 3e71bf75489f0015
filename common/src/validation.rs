use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{FieldError, ValidationError};
use crate::types::SensorReading;

/// 解析并校验请求体
///
/// 所有字段错误一次性收集返回；只有三个字段全部有效时才产生`SensorReading`。
pub fn parse_reading(body: &[u8]) -> Result<SensorReading, ValidationError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        debug!("Request body is not valid JSON: {}", e);
        ValidationError::single(FieldError::json_invalid(&String::from_utf8_lossy(body)))
    })?;

    validate_value(value)
}

/// 校验已解码的JSON值
pub fn validate_value(value: Value) -> Result<SensorReading, ValidationError> {
    let map = match value {
        Value::Object(map) => map,
        other => return Err(ValidationError::single(FieldError::not_an_object(other))),
    };

    let mut values = [0.0_f64; 3];
    let mut errors = Vec::new();

    for (slot, field) in values.iter_mut().zip(SensorReading::FIELDS) {
        match coerce_field(&map, field) {
            Ok(v) => *slot = v,
            Err(e) => errors.push(e),
        }
    }

    if !errors.is_empty() {
        return Err(ValidationError::new(errors));
    }

    let [gait, voice, tremor] = values;
    SensorReading::new(gait, voice, tremor)
}

/// 单字段转换：数字直接使用，数字字符串宽松转换，其余类型拒绝
fn coerce_field(map: &Map<String, Value>, field: &str) -> Result<f64, FieldError> {
    let input = match map.get(field) {
        Some(input) => input,
        None => return Err(FieldError::missing(field, Value::Object(map.clone()))),
    };

    let number = match input {
        // 超出f64范围的数字（如1e400）as_f64返回None，按原文解析得到无穷大
        Value::Number(n) => n
            .as_f64()
            .or_else(|| n.to_string().parse::<f64>().ok())
            .ok_or_else(|| FieldError::float_type(field, input.clone()))?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| FieldError::float_parsing(field, input.clone()))?,
        _ => return Err(FieldError::float_type(field, input.clone())),
    };

    if !number.is_finite() {
        return Err(FieldError::not_finite(field, number));
    }

    Ok(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kinds(err: &ValidationError) -> Vec<(Option<&str>, &str)> {
        err.errors()
            .iter()
            .map(|e| (e.field(), e.kind.as_str()))
            .collect()
    }

    #[test]
    fn test_parse_valid_body() {
        let reading = parse_reading(br#"{"gait": 59.9, "voice": 60, "tremor": 30}"#).unwrap();
        assert_eq!(reading, SensorReading { gait: 59.9, voice: 60.0, tremor: 30.0 });
    }

    #[test]
    fn test_extra_fields_ignored() {
        let reading = parse_reading(br#"{"gait": 1, "voice": 2, "tremor": 3, "user": "x"}"#).unwrap();
        assert_eq!(reading.tremor, 3.0);
    }

    #[test]
    fn test_numeric_strings_coerced() {
        let reading = parse_reading(br#"{"gait": "55.5", "voice": " 70 ", "tremor": "-1e2"}"#).unwrap();
        assert_eq!(reading, SensorReading { gait: 55.5, voice: 70.0, tremor: -100.0 });
    }

    #[test]
    fn test_missing_field() {
        let err = parse_reading(br#"{"gait": 50, "tremor": 40}"#).unwrap_err();
        assert_eq!(kinds(&err), vec![(Some("voice"), "missing")]);
        assert_eq!(err.errors()[0].input, json!({"gait": 50, "tremor": 40}));
    }

    #[test]
    fn test_all_errors_collected() {
        let err = parse_reading(br#"{"gait": "fast", "voice": null}"#).unwrap_err();
        assert_eq!(
            kinds(&err),
            vec![
                (Some("gait"), "float_parsing"),
                (Some("voice"), "float_type"),
                (Some("tremor"), "missing"),
            ]
        );
    }

    #[test]
    fn test_bool_is_not_a_number() {
        let err = validate_value(json!({"gait": true, "voice": 1, "tremor": 1})).unwrap_err();
        assert_eq!(kinds(&err), vec![(Some("gait"), "float_type")]);
    }

    #[test]
    fn test_non_finite_strings_rejected() {
        let err = parse_reading(br#"{"gait": "NaN", "voice": "inf", "tremor": "-infinity"}"#).unwrap_err();
        assert_eq!(
            kinds(&err),
            vec![
                (Some("gait"), "finite_number"),
                (Some("voice"), "finite_number"),
                (Some("tremor"), "finite_number"),
            ]
        );
    }

    #[test]
    fn test_overflowing_number_reported_per_field() {
        let err = parse_reading(br#"{"gait": 1e400, "voice": 50}"#).unwrap_err();
        assert_eq!(
            kinds(&err),
            vec![(Some("gait"), "finite_number"), (Some("tremor"), "missing")]
        );

        let err = parse_reading(br#"{"gait": 1, "voice": -1e400, "tremor": 1}"#).unwrap_err();
        assert_eq!(kinds(&err), vec![(Some("voice"), "finite_number")]);
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_reading(b"{\"gait\": ").unwrap_err();
        assert_eq!(kinds(&err), vec![(None, "json_invalid")]);

        let err = parse_reading(b"").unwrap_err();
        assert_eq!(kinds(&err), vec![(None, "json_invalid")]);
    }

    #[test]
    fn test_body_not_an_object() {
        let err = parse_reading(b"[59, 59, 31]").unwrap_err();
        assert_eq!(kinds(&err), vec![(None, "model_attributes_type")]);
    }
}
