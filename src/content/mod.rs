mod catalog;
mod language;
mod normalize;
mod prompt;
mod types;

pub use catalog::{CrisisLevel, CurriculumLevel, LessonStub};
pub use language::{Language, UnknownLanguage};
pub use normalize::{ExpectedShape, NormalizeError, normalize, normalize_text, strip_code_fence};
pub use prompt::{LessonPrompts, PromptBuilder};
pub use types::{
    LessonTopic, QUIZ_LENGTH, QUIZ_OPTION_COUNT, QuizItem, SCENARIO_OPTION_COUNT, Scenario,
};
