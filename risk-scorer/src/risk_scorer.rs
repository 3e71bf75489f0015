use tracing::debug;

use common::types::{RiskAssessment, RiskLevel, SensorReading};
use crate::risk_rules::{create_default_rule_chain, ScoringRuleChain};

/// 低风险分数上限（含）
pub const LOW_RISK_MAX: u32 = 2;
/// 中风险分数上限（含）
pub const MODERATE_RISK_MAX: u32 = 4;

/// 评分接口 - HTTP层只依赖此trait
pub trait Scorer: Send + Sync {
    fn score(&self, reading: &SensorReading) -> RiskAssessment;
}

/// 分数映射到风险等级
pub fn classify(score: u32) -> RiskLevel {
    if score <= LOW_RISK_MAX {
        RiskLevel::Low
    } else if score <= MODERATE_RISK_MAX {
        RiskLevel::Moderate
    } else {
        RiskLevel::High
    }
}

/// 风险评分器
///
/// 纯函数：无共享可变状态、无I/O，可在任意线程并发调用。
pub struct RiskScorer {
    rules: ScoringRuleChain,
}

impl RiskScorer {
    pub fn new() -> Self {
        Self {
            rules: create_default_rule_chain(),
        }
    }

    pub fn score(&self, reading: &SensorReading) -> RiskAssessment {
        let score = self.rules.total(reading);
        let assessment = RiskAssessment::new(score, classify(score));

        debug!(
            "Scored reading ({}): score={}, risk={}, triggered={:?}",
            reading,
            assessment.score,
            assessment.risk,
            self.rules.triggered_rules(reading)
        );

        assessment
    }
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer for RiskScorer {
    fn score(&self, reading: &SensorReading) -> RiskAssessment {
        RiskScorer::score(self, reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn score(gait: f64, voice: f64, tremor: f64) -> RiskAssessment {
        RiskScorer::new().score(&SensorReading { gait, voice, tremor })
    }

    #[test]
    fn test_boundary_cases() {
        assert_eq!(score(60.0, 60.0, 30.0), RiskAssessment::new(0, RiskLevel::Low));
        assert_eq!(score(59.9, 60.0, 30.0), RiskAssessment::new(2, RiskLevel::Low));
        assert_eq!(score(59.0, 59.0, 31.0), RiskAssessment::new(6, RiskLevel::High));
        assert_eq!(score(60.0, 59.0, 31.0), RiskAssessment::new(4, RiskLevel::Moderate));
    }

    #[test]
    fn test_classify_buckets() {
        assert_eq!(classify(0), RiskLevel::Low);
        assert_eq!(classify(2), RiskLevel::Low);
        assert_eq!(classify(3), RiskLevel::Moderate);
        assert_eq!(classify(4), RiskLevel::Moderate);
        assert_eq!(classify(5), RiskLevel::High);
        assert_eq!(classify(6), RiskLevel::High);
    }

    #[test]
    fn test_extreme_values_scored_as_is() {
        assert_eq!(score(-1.0e308, -5.0, 1.0e308), RiskAssessment::new(6, RiskLevel::High));
        assert_eq!(score(f64::MAX, f64::MAX, f64::MIN), RiskAssessment::new(0, RiskLevel::Low));
    }

    #[test]
    fn test_scorer_trait_object() {
        let scorer: Box<dyn Scorer> = Box::new(RiskScorer::default());
        let reading = SensorReading { gait: 10.0, voice: 10.0, tremor: 0.0 };
        assert_eq!(scorer.score(&reading), RiskAssessment::new(4, RiskLevel::Moderate));
    }

    proptest! {
        #[test]
        fn score_is_even_and_bounded(gait in any::<f64>(), voice in any::<f64>(), tremor in any::<f64>()) {
            let assessment = score(gait, voice, tremor);
            prop_assert!([0, 2, 4, 6].contains(&assessment.score));
        }

        #[test]
        fn label_matches_score(gait in -1000.0..1000.0f64, voice in -1000.0..1000.0f64, tremor in -1000.0..1000.0f64) {
            let assessment = score(gait, voice, tremor);
            let expected = match assessment.score {
                0 | 2 => RiskLevel::Low,
                4 => RiskLevel::Moderate,
                _ => RiskLevel::High,
            };
            prop_assert_eq!(assessment.risk, expected);
        }

        #[test]
        fn score_counts_conditions(gait in 0.0..120.0f64, voice in 0.0..120.0f64, tremor in 0.0..60.0f64) {
            let conditions = [gait < 60.0, voice < 60.0, tremor > 30.0]
                .iter()
                .filter(|c| **c)
                .count() as u32;
            prop_assert_eq!(score(gait, voice, tremor).score, conditions * 2);
        }

        #[test]
        fn scoring_is_idempotent(gait in any::<f64>(), voice in any::<f64>(), tremor in any::<f64>()) {
            let scorer = RiskScorer::new();
            let reading = SensorReading { gait, voice, tremor };
            prop_assert_eq!(scorer.score(&reading), scorer.score(&reading));
        }
    }
}
