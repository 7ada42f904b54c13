use serde::{Deserialize, Serialize};

pub const SCENARIO_OPTION_COUNT: usize = 4;
pub const QUIZ_LENGTH: usize = 5;
pub const QUIZ_OPTION_COUNT: usize = 4;

/// A crisis narrative with the four responses the learner chooses from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(rename = "scenario")]
    pub text: String,
    pub options: Vec<String>,
}

/// One multiple-choice question. The model writes the correct option under
/// `answer`; clients read it back as `correctAnswer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizItem {
    pub question: String,
    pub options: Vec<String>,
    #[serde(rename = "correctAnswer", alias = "answer")]
    pub correct_answer: String,
}

/// A generated lesson: markdown body plus its quiz.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LessonTopic {
    pub title: String,
    pub body: String,
    pub quiz: Vec<QuizItem>,
}
