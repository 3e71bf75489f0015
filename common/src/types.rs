use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FieldError, ValidationError};

/// 传感器读数 - 每次请求创建，评分后丢弃
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorReading {
    pub gait: f64,    // 步态
    pub voice: f64,   // 语音
    pub tremor: f64,  // 震颤
}

impl SensorReading {
    /// 请求体中必须出现的字段，按校验顺序排列
    pub const FIELDS: [&'static str; 3] = ["gait", "voice", "tremor"];

    /// 创建读数，拒绝NaN和无穷大
    pub fn new(gait: f64, voice: f64, tremor: f64) -> Result<Self, ValidationError> {
        let errors: Vec<FieldError> = Self::FIELDS
            .iter()
            .zip([gait, voice, tremor])
            .filter(|(_, value)| !value.is_finite())
            .map(|(field, value)| FieldError::not_finite(field, value))
            .collect();

        if !errors.is_empty() {
            return Err(ValidationError::new(errors));
        }

        Ok(Self { gait, voice, tremor })
    }
}

impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gait={} voice={} tremor={}", self.gait, self.voice, self.tremor)
    }
}

/// 风险等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "High Risk")]
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Moderate, RiskLevel::High];

    /// 对外返回的固定标签
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Moderate => "Moderate Risk",
            RiskLevel::High => "High Risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 风险评估结果
///
/// 字段顺序即响应JSON的字段顺序：`{"risk": ..., "score": ...}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk: RiskLevel,
    pub score: u32,
}

impl RiskAssessment {
    pub fn new(score: u32, risk: RiskLevel) -> Self {
        Self { risk, score }
    }
}
