pub mod classifier;
pub mod features;
pub mod scorer;

pub use classifier::{Classifier, LoadedModel, ModelArtifact, SoftmaxClassifier};
pub use features::{FeatureVocabulary, PROFILE_FEATURES};
pub use scorer::{MatchScorer, ScoreOutcome};
