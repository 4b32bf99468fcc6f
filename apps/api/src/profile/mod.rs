// Candidate intake: skill normalization and RIASEC assessment scoring.

pub mod assessment;
pub mod builder;

pub use assessment::{score_answers, AnswerScale, RiasecAnswers};
pub use builder::ProfileBuilder;
