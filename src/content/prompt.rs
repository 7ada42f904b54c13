use super::{
    catalog::CrisisLevel,
    language::Language,
    types::{QUIZ_LENGTH, QUIZ_OPTION_COUNT, SCENARIO_OPTION_COUNT},
};

/// Builds the prompts sent to the model. Every prompt ends with the
/// language directive for the requested language.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder {
    language: Language,
}

/// The two independent prompts behind a generated lesson.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonPrompts {
    pub content: String,
    pub quiz: String,
}

impl PromptBuilder {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    fn finish(&self, prompt: String) -> String {
        format!("{}{}", prompt.trim_end(), self.language.directive())
    }

    pub fn scenario(&self, level: CrisisLevel) -> String {
        self.finish(format!(
            r#"Imagine you are a rural woman running a small business or trying to become financially independent.
Suddenly, a crisis occurs that threatens your ability to sustain yourself. Describe the situation in the
second person ("you") as if the woman is experiencing it herself. The crisis should be a "{label}".
Make the scenario emotionally engaging and very clear.

Provide exactly {count} multiple-choice options for how she can respond to the crisis.
The options should be realistic and relevant to her situation.

Return the output as a JSON object with the following structure:

{{
  "scenario": "[A very clear and emotionally engaging situation]",
  "options": [
    "Option 1",
    "Option 2",
    "Option 3",
    "Option 4"
  ]
}}

Do NOT include any explanations beyond the scenario and the {count} choices.
Do NOT add unnecessary text.
Do NOT repeat the answer format in the output."#,
            label = level.label(),
            count = SCENARIO_OPTION_COUNT,
        ))
    }

    pub fn feedback(&self, scenario: &str, choice: &str) -> String {
        self.finish(format!(
            r#"As a crisis management expert, evaluate this response to an emergency scenario:

Scenario: {scenario}

User's Response: {choice}

Provide a brief, constructive feedback (2-3 sentences) on this choice. Consider:
1. The immediate safety impact
2. The long-term consequences
3. Best practices in emergency response

Format your response to the user (this is a crisis readiness planner and everything is a simulation).
Focus on what they did well and/or how they could improve their response.
Keep it very brief, educational and encouraging. If the answer is incorrect, kindly suggest they try again."#
        ))
    }

    pub fn lesson(&self, topic: &str) -> LessonPrompts {
        let content = self.finish(format!(
            r#"You are a financial literacy and crisis readiness teacher for rural women entrepreneurs.
Write a short lesson on the topic "{topic}".

Use markdown with a title, short sections and bullet points. Use simple words and practical,
real-life examples a small business owner can act on.

Do NOT include any quiz, test questions, or multiple-choice questions in the lesson."#
        ));

        let quiz = self.finish(format!(
            r#"Create exactly {QUIZ_LENGTH} multiple-choice questions that test understanding of the topic "{topic}"
for rural women entrepreneurs learning about crisis readiness.

Each question must have exactly {QUIZ_OPTION_COUNT} options and exactly one correct answer.
The "answer" field must repeat the full text of the correct option.

Return ONLY a JSON array with the following structure:

[
  {{
    "question": "Question text",
    "options": ["Option 1", "Option 2", "Option 3", "Option 4"],
    "answer": "Option 2"
  }}
]

Do NOT wrap the array in an object. Do NOT add explanations or any text outside the JSON."#
        ));

        LessonPrompts { content, quiz }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scenario_prompt_names_crisis_and_schema() {
        let level = CrisisLevel::new(6).unwrap();
        let prompt = PromptBuilder::default().scenario(level);

        assert!(prompt.contains("\"Natural Disaster\""));
        assert!(prompt.contains("second person"));
        assert!(prompt.contains("\"scenario\""));
        assert!(prompt.contains("\"options\""));
        assert!(prompt.ends_with("Do NOT repeat the answer format in the output."));
    }

    #[test]
    fn test_language_directive_appended() {
        let level = CrisisLevel::new(1).unwrap();
        let prompt = PromptBuilder::new(Language::Telugu).scenario(level);
        assert!(prompt.ends_with(Language::Telugu.directive()));

        let feedback = PromptBuilder::new(Language::Hindi).feedback("s", "c");
        assert!(feedback.ends_with(Language::Hindi.directive()));
    }

    #[test]
    fn test_feedback_prompt_interpolates_verbatim() {
        let prompt = PromptBuilder::default().feedback("Your well ran dry.", "Dig deeper {now}");
        assert!(prompt.contains("Scenario: Your well ran dry."));
        assert!(prompt.contains("User's Response: Dig deeper {now}"));
        assert!(prompt.contains("2-3 sentences"));
    }

    #[test]
    fn test_lesson_prompts_are_independent() {
        let prompts = PromptBuilder::new(Language::Tamil).lesson("Insurance Basics");

        assert!(prompts.content.contains("\"Insurance Basics\""));
        assert!(prompts.content.contains("Do NOT include any quiz"));
        assert!(prompts.quiz.contains("exactly 5 multiple-choice questions"));
        assert!(prompts.quiz.contains("\"answer\""));
        assert!(prompts.content.ends_with(Language::Tamil.directive()));
        assert!(prompts.quiz.ends_with(Language::Tamil.directive()));
    }

    #[test]
    fn test_english_prompt_has_no_directive() {
        let english = PromptBuilder::new(Language::English).lesson("Budgeting");
        let default = PromptBuilder::default().lesson("Budgeting");
        assert_eq!(english, default);
        assert!(!english.quiz.contains("Write the entire response"));
    }
}
