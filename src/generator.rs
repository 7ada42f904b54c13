use crate::{
    Result,
    config::LlmConfig,
    content::{
        CrisisLevel, Language, LessonTopic, NormalizeError, PromptBuilder, QuizItem, Scenario,
        normalize, normalize_text,
    },
    llm::{ChatCompletionRequest, ChatMessage, LlmClient, OpenAiClient},
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Builds prompts, calls the model and normalizes what comes back. Holds no
/// per-request state, so one instance serves every request.
pub struct ContentGenerator {
    llm_client: Arc<dyn LlmClient>,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u16>,
    system_prompt: Option<String>,
}

impl ContentGenerator {
    pub fn new(llm_config: &LlmConfig) -> Self {
        info!(
            "Initializing content generator with {} model {}",
            llm_config.provider, llm_config.model
        );
        Self::with_client(Arc::new(OpenAiClient::new(llm_config)), llm_config)
    }

    pub fn with_client(llm_client: Arc<dyn LlmClient>, llm_config: &LlmConfig) -> Self {
        Self {
            llm_client,
            model: llm_config.model.clone(),
            temperature: llm_config.temperature,
            max_tokens: llm_config.max_tokens,
            system_prompt: llm_config.system_prompt.clone(),
        }
    }

    /// Sends a single prompt and returns the raw text of the first choice.
    pub async fn complete(&self, prompt: String) -> Result<String> {
        let mut messages = Vec::with_capacity(2);
        if let Some(ref system_prompt) = self.system_prompt {
            messages.push(ChatMessage::system(system_prompt.clone()));
        }
        messages.push(ChatMessage::user(prompt));

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self.llm_client.create_chat_completion(request).await?;
        debug!(
            "Model {} returned {} choices",
            response.model,
            response.choices.len()
        );

        Ok(response.first_text().to_string())
    }

    pub async fn scenario(&self, level: CrisisLevel, language: Language) -> Result<Scenario> {
        let prompt = PromptBuilder::new(language).scenario(level);
        let raw = self.complete(prompt).await?;

        let scenario =
            normalize::<Scenario>(&raw).inspect_err(|e| log_rejected("scenario", &raw, e))?;
        Ok(scenario)
    }

    pub async fn feedback(
        &self,
        scenario: &str,
        choice: &str,
        language: Language,
    ) -> Result<String> {
        let prompt = PromptBuilder::new(language).feedback(scenario, choice);
        let raw = self.complete(prompt).await?;

        let feedback =
            normalize_text(&raw).inspect_err(|e| log_rejected("feedback", &raw, e))?;
        Ok(feedback)
    }

    /// Generates the lesson body and then its quiz; a failure in either fails
    /// the whole lesson.
    pub async fn lesson(&self, topic: &str, language: Language) -> Result<LessonTopic> {
        let prompts = PromptBuilder::new(language).lesson(topic);

        let raw_body = self.complete(prompts.content).await?;
        let body =
            normalize_text(&raw_body).inspect_err(|e| log_rejected("lesson", &raw_body, e))?;

        let raw_quiz = self.complete(prompts.quiz).await?;
        let quiz = normalize::<Vec<QuizItem>>(&raw_quiz)
            .inspect_err(|e| log_rejected("quiz", &raw_quiz, e))?;

        Ok(LessonTopic {
            title: topic.to_string(),
            body,
            quiz,
        })
    }
}

fn log_rejected(kind: &str, raw: &str, error: &NormalizeError) {
    warn!(
        "Rejected {} response from model: {}. Raw text: {:?}",
        kind, error, raw
    );
}
