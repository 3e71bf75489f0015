use tracing::debug;

use common::types::SensorReading;

/// 步态阈值，低于此值计分
pub const GAIT_THRESHOLD: f64 = 60.0;
/// 语音阈值，低于此值计分
pub const VOICE_THRESHOLD: f64 = 60.0;
/// 震颤阈值，高于此值计分
pub const TREMOR_THRESHOLD: f64 = 30.0;
/// 每条规则触发时贡献的分数
pub const RULE_POINTS: u32 = 2;

/// 评分规则trait - 每个信号一条规则
pub trait ScoringRule: Send + Sync {
    /// 规则名称
    fn name(&self) -> &str;

    /// 是否触发（严格不等式）
    fn triggered(&self, reading: &SensorReading) -> bool;

    /// 触发时贡献的分数
    fn points(&self) -> u32 {
        RULE_POINTS
    }

    /// 本规则对总分的贡献，未触发为0
    fn contribution(&self, reading: &SensorReading) -> u32 {
        if self.triggered(reading) {
            self.points()
        } else {
            0
        }
    }
}

/// 步态规则：gait < 60
pub struct GaitRule {
    threshold: f64,
}

impl GaitRule {
    pub fn new() -> Self {
        Self { threshold: GAIT_THRESHOLD }
    }
}

impl ScoringRule for GaitRule {
    fn name(&self) -> &str {
        "Gait"
    }

    fn triggered(&self, reading: &SensorReading) -> bool {
        reading.gait < self.threshold
    }
}

/// 语音规则：voice < 60
pub struct VoiceRule {
    threshold: f64,
}

impl VoiceRule {
    pub fn new() -> Self {
        Self { threshold: VOICE_THRESHOLD }
    }
}

impl ScoringRule for VoiceRule {
    fn name(&self) -> &str {
        "Voice"
    }

    fn triggered(&self, reading: &SensorReading) -> bool {
        reading.voice < self.threshold
    }
}

/// 震颤规则：tremor > 30
pub struct TremorRule {
    threshold: f64,
}

impl TremorRule {
    pub fn new() -> Self {
        Self { threshold: TREMOR_THRESHOLD }
    }
}

impl ScoringRule for TremorRule {
    fn name(&self) -> &str {
        "Tremor"
    }

    fn triggered(&self, reading: &SensorReading) -> bool {
        reading.tremor > self.threshold
    }
}

/// 评分规则链 - 按顺序累加所有规则的分数
pub struct ScoringRuleChain {
    rules: Vec<Box<dyn ScoringRule>>,
}

impl ScoringRuleChain {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// 添加规则
    pub fn add_rule(mut self, rule: Box<dyn ScoringRule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// 所有规则的分数之和
    pub fn total(&self, reading: &SensorReading) -> u32 {
        self.rules
            .iter()
            .map(|rule| {
                let points = rule.contribution(reading);
                if points > 0 {
                    debug!("Rule {} triggered: +{}", rule.name(), points);
                }
                points
            })
            .sum()
    }

    /// 触发的规则名称，用于日志
    pub fn triggered_rules(&self, reading: &SensorReading) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|rule| rule.triggered(reading))
            .map(|rule| rule.name())
            .collect()
    }
}

/// 创建默认规则链：步态 -> 语音 -> 震颤
pub fn create_default_rule_chain() -> ScoringRuleChain {
    ScoringRuleChain::new()
        .add_rule(Box::new(GaitRule::new()))
        .add_rule(Box::new(VoiceRule::new()))
        .add_rule(Box::new(TremorRule::new()))
}
