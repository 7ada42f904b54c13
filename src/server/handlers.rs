use super::types::{
    ApiError, EvaluateRequest, FeedbackResponse, GenerateLessonResponse, LanguageQuery,
    LessonSummary, MessageResponse, ScenarioResponse, SelectedLevelRequest,
};
use crate::{
    assets::ImageStore,
    content::{CrisisLevel, CurriculumLevel, Language},
    generator::ContentGenerator,
};
use axum::{
    extract::{Path, Query, State, rejection::JsonRejection},
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};

const FALLBACK_FEEDBACK: &str =
    "We're having trouble evaluating your response. Please try again.";

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<ContentGenerator>,
    pub images: Arc<ImageStore>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub async fn get_scenario(
    State(state): State<AppState>,
    Path(level): Path<String>,
    Query(query): Query<LanguageQuery>,
) -> Result<Json<ScenarioResponse>, ApiError> {
    let level = level.parse::<CrisisLevel>().map_err(|e| {
        warn!("Rejected scenario request: {}", e);
        ApiError::not_found("Invalid level")
    })?;
    let language = Language::from_param(query.language.as_deref());

    info!("Generating scenario for level {} in {}", level, language);

    match state.generator.scenario(level, language).await {
        Ok(scenario) => {
            let image_base64 = state.images.load_base64(level).await;
            Ok(Json(ScenarioResponse {
                scenario: scenario.text,
                image_base64,
                response_options: scenario.options,
            }))
        }
        Err(e) if e.is_normalization() => {
            error!("Unusable scenario for level {}: {}", level, e);
            Err(ApiError::new(
                e.status_code(),
                "AI response format incorrect, try again.",
            ))
        }
        Err(e) => {
            error!("Failed to generate scenario for level {}: {}", level, e);
            Err(ApiError::new(e.status_code(), "Failed to generate scenario"))
        }
    }
}

pub async fn evaluate(
    State(state): State<AppState>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Rejected evaluate body: {}", rejection);
            return Err(ApiError::bad_request("Invalid input"));
        }
    };

    let (Some(choice), Some(scenario)) =
        (non_blank(request.choice), non_blank(request.scenario))
    else {
        warn!("Evaluate request missing choice or scenario");
        return Err(ApiError::bad_request("Invalid input"));
    };
    let language = Language::from_param(request.language.as_deref());

    info!("Evaluating choice in {}", language);

    match state.generator.feedback(&scenario, &choice, language).await {
        Ok(feedback) => Ok(Json(FeedbackResponse { feedback })),
        Err(e) => {
            error!("Failed to generate feedback: {}", e);
            Err(ApiError::new(e.status_code(), "Failed to generate feedback")
                .with_feedback(FALLBACK_FEEDBACK))
        }
    }
}

pub async fn selected_level(
    payload: Result<Json<SelectedLevelRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Rejected selected_level body: {}", rejection);
            return Err(ApiError::bad_request("Level is required"));
        }
    };

    let Some(level) = non_blank(request.level) else {
        return Err(ApiError::bad_request("Level is required"));
    };

    let level = level.parse::<CurriculumLevel>().map_err(|e| {
        warn!("{}", e);
        ApiError::new(e.status_code(), "Invalid level")
    })?;

    info!("Learner selected {} curriculum", level);

    Ok(Json(MessageResponse {
        message: format!("Level set to {}", level),
    }))
}

pub async fn lessons(
    Path(level): Path<String>,
    Query(query): Query<LanguageQuery>,
) -> Result<Json<Vec<LessonSummary>>, ApiError> {
    let level = level.parse::<CurriculumLevel>().map_err(|e| {
        warn!("{}", e);
        ApiError::not_found("Invalid level")
    })?;
    let suffix = Language::from_param(query.language.as_deref())
        .lesson_suffix()
        .unwrap_or_default();

    let lessons = level
        .lessons()
        .iter()
        .map(|stub| LessonSummary {
            title: stub.title.to_string(),
            description: format!("{}{}", stub.description, suffix),
        })
        .collect();

    Ok(Json(lessons))
}

pub async fn generate_lesson(
    State(state): State<AppState>,
    Path(topic): Path<String>,
    Query(query): Query<LanguageQuery>,
) -> Result<Json<GenerateLessonResponse>, ApiError> {
    let language = Language::from_param(query.language.as_deref());

    info!("Generating lesson '{}' in {}", topic, language);

    match state.generator.lesson(&topic, language).await {
        Ok(lesson) => Ok(Json(GenerateLessonResponse {
            content: lesson.body,
            mcqs: lesson.quiz,
        })),
        Err(e) => {
            error!("Failed to generate lesson '{}': {}", topic, e);
            Err(ApiError::new(e.status_code(), "Failed to generate lesson"))
        }
    }
}
