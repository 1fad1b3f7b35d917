pub mod loaders;
pub mod question;
pub mod report;
pub mod topic;

pub use loaders::load_corrections;
pub use question::{CorrectAnswer, Difficulty, ExamInfo, QuestionBank, QuestionRecord};
pub use report::{ExtractionInfo, ExtractionReport};
pub use topic::Topic;
