//! Commentary client with model fallback.
//!
//! Tries the remembered preferred model first, then the rest of the
//! configured list in order. Whichever model answers becomes the new
//! preference for the next call.

use serde::{Deserialize, Serialize};

use super::backend::{ContentBackend, ContentError};
use super::CommentaryRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentaryConfig {
    /// Models in fallback order
    pub models: Vec<String>,
}

impl Default for CommentaryConfig {
    fn default() -> Self {
        Self {
            models: vec!["local-template".to_string()],
        }
    }
}

/// Generated text plus the model that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commentary {
    pub frame: u64,
    pub model: String,
    pub text: String,
}

pub struct CommentaryClient<B: ContentBackend> {
    backend: B,
    models: Vec<String>,
    preferred: Option<usize>,
}

impl<B: ContentBackend> CommentaryClient<B> {
    pub fn new(backend: B, config: CommentaryConfig) -> Self {
        Self {
            backend,
            models: config.models,
            preferred: None,
        }
    }

    pub fn preferred_model(&self) -> Option<&str> {
        self.preferred.map(|i| self.models[i].as_str())
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    fn attempt_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = self.preferred.into_iter().collect();
        order.extend((0..self.models.len()).filter(|&i| Some(i) != self.preferred));
        order
    }

    pub fn generate(&mut self, request: &CommentaryRequest) -> Result<Commentary, ContentError> {
        if self.models.is_empty() {
            return Err(ContentError::NoModels);
        }

        let mut last = None;
        for index in self.attempt_order() {
            let model = &self.models[index];
            match self.backend.generate(model, request) {
                Ok(text) if text.trim().is_empty() => {
                    last = Some(ContentError::EmptyResponse {
                        model: model.clone(),
                    });
                }
                Ok(text) => {
                    if self.preferred != Some(index) {
                        log::info!("[Commentary] preferring model {model}");
                    }
                    self.preferred = Some(index);
                    return Ok(Commentary {
                        frame: request.frame,
                        model: model.clone(),
                        text,
                    });
                }
                Err(err) => {
                    log::debug!("[Commentary] {model} failed: {err}");
                    last = Some(err);
                }
            }
        }

        Err(ContentError::AllModelsFailed {
            attempts: self.models.len(),
            last: last.map(|e| e.to_string()).unwrap_or_default(),
        })
    }
}
