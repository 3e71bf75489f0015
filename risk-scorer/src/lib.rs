pub mod risk_rules;
pub mod risk_scorer;

pub use risk_rules::{ScoringRule, ScoringRuleChain};
pub use risk_scorer::{classify, RiskScorer, Scorer};
