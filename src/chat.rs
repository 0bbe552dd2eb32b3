//! Multi-turn conversations on top of [`GenerativeModel`].

use snafu::ResultExt;
use tracing::{debug, instrument};

use crate::{
    client::{Error as ClientError, InvalidContentSnafu},
    generation::{GenerateContentResponse, GenerativeModel},
    models::{Content, Part, Role},
};

/// A single conversation thread.
///
/// Each call to [`send_message`](Self::send_message) appends the user turn to
/// the history and sends the whole history. The model's reply is appended only
/// when the call succeeds and returns at least one candidate with content; a
/// failed exchange leaves the user turn in place and nothing else.
pub struct ChatSession {
    model: GenerativeModel,
    history: Vec<Content>,
}

impl ChatSession {
    pub(crate) fn new(model: GenerativeModel) -> Self {
        Self::with_history(model, Vec::new())
    }

    pub(crate) fn with_history(model: GenerativeModel, history: Vec<Content>) -> Self {
        Self { model, history }
    }

    /// Turns exchanged so far, oldest first
    pub fn history(&self) -> &[Content] {
        &self.history
    }

    pub fn model(&self) -> &GenerativeModel {
        &self.model
    }

    /// Sends `parts` as the next user turn.
    #[instrument(skip_all, fields(
        model = %self.model.model(),
        history.len = self.history.len(),
    ))]
    pub async fn send_message(
        &mut self,
        parts: impl IntoIterator<Item = Part>,
    ) -> Result<GenerateContentResponse, ClientError> {
        let content = Content::user(parts).context(InvalidContentSnafu)?;
        self.history.push(content);

        let response = self
            .model
            .generate_content_with_contents(self.history.clone())
            .await?;

        match response.candidates.first().and_then(|c| c.content.as_ref()) {
            Some(reply) => self.history.push(reply.clone().with_role(Role::Model)),
            None => debug!("reply carried no candidate content; history keeps the user turn only"),
        }

        Ok(response)
    }
}
