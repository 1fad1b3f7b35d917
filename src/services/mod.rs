pub mod answer;
pub mod bank_store;
pub mod classifier;
pub mod extractor;
pub mod gap_analysis;
pub mod merge;
pub mod summary;

pub use answer::{AnswerGuess, AnswerIdentifier};
pub use bank_store::BankStore;
pub use classifier::TopicClassifier;
pub use extractor::{QuestionBlock, QuestionExtractor};
pub use gap_analysis::{GapAnalyzer, GapReport};
pub use merge::{MergeOutcome, MergeService};
pub use summary::{AnswerTypeStats, SummaryReporter};
