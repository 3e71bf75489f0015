use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// 单个字段的校验错误
///
/// 序列化格式：`{"type": ..., "loc": ["body", field], "msg": ..., "input": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: String,
    pub loc: Vec<String>,
    pub msg: String,
    pub input: Value,
}

impl FieldError {
    fn at_body(kind: &str, msg: &str, input: Value) -> Self {
        Self {
            kind: kind.to_string(),
            loc: vec!["body".to_string()],
            msg: msg.to_string(),
            input,
        }
    }

    fn at_field(field: &str, kind: &str, msg: &str, input: Value) -> Self {
        Self {
            kind: kind.to_string(),
            loc: vec!["body".to_string(), field.to_string()],
            msg: msg.to_string(),
            input,
        }
    }

    /// 请求体不是合法JSON
    pub fn json_invalid(raw: &str) -> Self {
        Self::at_body("json_invalid", "JSON decode error", Value::String(raw.to_string()))
    }

    /// 请求体是JSON但不是对象
    pub fn not_an_object(input: Value) -> Self {
        Self::at_body(
            "model_attributes_type",
            "Input should be a valid dictionary or object to extract fields from",
            input,
        )
    }

    /// 缺少必填字段，input为整个请求体
    pub fn missing(field: &str, body: Value) -> Self {
        Self::at_field(field, "missing", "Field required", body)
    }

    /// 字符串无法解析为数字
    pub fn float_parsing(field: &str, input: Value) -> Self {
        Self::at_field(
            field,
            "float_parsing",
            "Input should be a valid number, unable to parse string as a number",
            input,
        )
    }

    /// 非数字类型（布尔、null、数组、对象）
    pub fn float_type(field: &str, input: Value) -> Self {
        Self::at_field(field, "float_type", "Input should be a valid number", input)
    }

    /// NaN或无穷大
    pub fn not_finite(field: &str, value: f64) -> Self {
        Self::at_field(
            field,
            "finite_number",
            "Input should be a finite number",
            Value::String(value.to_string()),
        )
    }

    /// 出错的字段名；请求体级别的错误返回None
    pub fn field(&self) -> Option<&str> {
        self.loc.get(1).map(String::as_str)
    }
}

/// 唯一的领域错误类型：输入缺失或不是数字
///
/// 总是在评分之前产生，至少包含一个字段错误。
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} validation error(s) for SensorReading: {}", .errors.len(), summarize(.errors))]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self { errors }
    }

    pub fn single(error: FieldError) -> Self {
        Self { errors: vec![error] }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} ({})", e.loc.join("."), e.kind))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_error_serialization() {
        let err = FieldError::missing("voice", json!({"gait": 50, "tremor": 20}));
        let value = serde_json::to_value(&err).unwrap();

        assert_eq!(value["type"], "missing");
        assert_eq!(value["loc"], json!(["body", "voice"]));
        assert_eq!(value["msg"], "Field required");
        assert_eq!(value["input"], json!({"gait": 50, "tremor": 20}));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(vec![
            FieldError::missing("voice", json!({})),
            FieldError::float_type("tremor", json!(true)),
        ]);

        assert_eq!(
            err.to_string(),
            "2 validation error(s) for SensorReading: body.voice (missing), body.tremor (float_type)"
        );
        assert_eq!(err.errors()[1].field(), Some("tremor"));
    }

    #[test]
    fn test_body_level_error_has_no_field() {
        let err = FieldError::json_invalid("{");
        assert_eq!(err.field(), None);
        assert_eq!(err.loc, vec!["body".to_string()]);
    }
}
