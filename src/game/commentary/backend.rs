//! Content backends.
//!
//! A backend turns a [`CommentaryRequest`] into a line of text using a named
//! model. Network backends live in the host; [`TemplateBackend`] is the
//! offline one the headless runner uses.

use thiserror::Error;

use super::CommentaryRequest;
use crate::player::OrientationState;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("model {model} is unavailable")]
    Unavailable { model: String },

    #[error("model {model} rejected the request: {reason}")]
    Rejected { model: String, reason: String },

    #[error("model {model} returned an empty response")]
    EmptyResponse { model: String },

    #[error("no model configured")]
    NoModels,

    #[error("all {attempts} models failed, last error: {last}")]
    AllModelsFailed { attempts: usize, last: String },

    #[error("failed to start commentary worker: {0}")]
    Spawn(String),
}

/// Something that can write commentary with a given model.
pub trait ContentBackend: Send {
    fn generate(&mut self, model: &str, request: &CommentaryRequest) -> Result<String, ContentError>;
}

impl<B: ContentBackend + ?Sized> ContentBackend for Box<B> {
    fn generate(&mut self, model: &str, request: &CommentaryRequest) -> Result<String, ContentError> {
        (**self).generate(model, request)
    }
}

/// Offline backend: canned lines filled in from the request.
#[derive(Debug, Clone, Default)]
pub struct TemplateBackend;

impl ContentBackend for TemplateBackend {
    fn generate(&mut self, _model: &str, request: &CommentaryRequest) -> Result<String, ContentError> {
        let opener = match request.state {
            OrientationState::Underwater => "Deep below the waves",
            OrientationState::WaterSurface => "Skimming the surface",
            OrientationState::Land => "Flopping across the sand",
        };
        let pace = if request.boosting {
            "at full burst"
        } else if request.speed > 10.0 {
            "at a brisk clip"
        } else {
            "at a lazy cruise"
        };
        let haul = match request.captures {
            0 => "still hunting for a first catch".to_string(),
            1 => "one fish down".to_string(),
            n => format!("{n} fish down"),
        };
        Ok(format!(
            "{opener} {pace}, {haul} with {} points on the board.",
            request.score
        ))
    }
}
