pub mod processor;
pub mod rules;

pub use processor::{IdGenerator, ReceiptProcessor, UuidGenerator};
pub use rules::{parse_amount, score, score_breakdown, Rule, RuleContribution, ScoreBreakdown};
