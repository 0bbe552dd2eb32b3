use snafu::ResultExt;
use tracing::instrument;

use crate::{
    chat::ChatSession,
    client::{Error as ClientError, Gemini, GenerationStream, InvalidContentSnafu, Model},
    generation::{
        CountTokensRequest, CountTokensResponse, GenerateContentRequest, GenerateContentResponse,
        GenerateContentStreamRequest, GenerationConfig, SystemInstructions,
    },
    models::{Content, Part},
    safety::SafetySetting,
};

/// Per-conversation configuration for one model.
///
/// Every `with_*` method returns a new value and leaves the receiver untouched,
/// so a configured model can be shared between conversations freely.
#[derive(Clone)]
pub struct GenerativeModel {
    client: Gemini,
    model: Model,
    safety_settings: Vec<SafetySetting>,
    generation_config: Option<GenerationConfig>,
    system_instructions: SystemInstructions,
}

impl GenerativeModel {
    pub(crate) fn new(client: Gemini, model: Model) -> Self {
        Self {
            client,
            model,
            safety_settings: Vec::new(),
            generation_config: None,
            system_instructions: SystemInstructions::default(),
        }
    }

    /// Returns a copy with `setting` appended. Duplicates are kept.
    pub fn with_added_safety_setting(&self, setting: SafetySetting) -> Self {
        let mut model = self.clone();
        model.safety_settings.push(setting);
        model
    }

    /// Returns a copy whose generation config is replaced by `config`.
    pub fn with_generation_config(&self, config: GenerationConfig) -> Self {
        Self {
            generation_config: Some(config),
            ..self.clone()
        }
    }

    /// Returns a copy whose system instructions are replaced by `instructions`.
    pub fn with_system_instructions(&self, instructions: impl Into<SystemInstructions>) -> Self {
        Self {
            system_instructions: instructions.into(),
            ..self.clone()
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn safety_settings(&self) -> &[SafetySetting] {
        &self.safety_settings
    }

    pub fn generation_config(&self) -> Option<&GenerationConfig> {
        self.generation_config.as_ref()
    }

    pub fn system_instructions(&self) -> &SystemInstructions {
        &self.system_instructions
    }

    /// Builds the request `generate_content_with_contents` would send.
    pub fn build_request(&self, contents: Vec<Content>) -> GenerateContentRequest {
        GenerateContentRequest::new(
            self.model.clone(),
            contents,
            self.safety_settings.clone(),
            self.generation_config.clone(),
            self.system_instructions.clone(),
        )
    }

    /// Sends `parts` as a single user turn.
    pub async fn generate_content(
        &self,
        parts: impl IntoIterator<Item = Part>,
    ) -> Result<GenerateContentResponse, ClientError> {
        let content = Content::user(parts).context(InvalidContentSnafu)?;
        self.generate_content_with_contents(vec![content]).await
    }

    /// Sends a full conversation.
    ///
    /// Transport failures are returned exactly as the transport produced them.
    #[instrument(skip_all, fields(
        model = %self.model,
        contents.count = contents.len(),
        safety_settings.count = self.safety_settings.len(),
        generation_config.present = self.generation_config.is_some(),
        system_instructions.present = !self.system_instructions.is_empty(),
    ))]
    pub async fn generate_content_with_contents(
        &self,
        contents: Vec<Content>,
    ) -> Result<GenerateContentResponse, ClientError> {
        let request = self.build_request(contents);
        self.client.generate_content(request).await
    }

    /// Streams the reply to `parts` sent as a single user turn.
    pub fn generate_content_stream(
        &self,
        parts: impl IntoIterator<Item = Part>,
    ) -> Result<GenerationStream, ClientError> {
        let content = Content::user(parts).context(InvalidContentSnafu)?;
        self.generate_content_stream_with_contents(vec![content])
    }

    /// Streams the reply to a full conversation.
    pub fn generate_content_stream_with_contents(
        &self,
        contents: Vec<Content>,
    ) -> Result<GenerationStream, ClientError> {
        let request = GenerateContentStreamRequest::from(self.build_request(contents));
        self.client.generate_content_stream(request)
    }

    /// Counts the tokens of `parts` sent as a single user turn.
    pub async fn count_tokens(
        &self,
        parts: impl IntoIterator<Item = Part>,
    ) -> Result<CountTokensResponse, ClientError> {
        let content = Content::user(parts).context(InvalidContentSnafu)?;
        self.count_tokens_with_contents(vec![content]).await
    }

    pub async fn count_tokens_with_contents(
        &self,
        contents: Vec<Content>,
    ) -> Result<CountTokensResponse, ClientError> {
        let request = CountTokensRequest::new(self.model.clone(), contents);
        self.client.count_tokens(request).await
    }

    /// Starts a conversation with an empty history
    pub fn start_chat(&self) -> ChatSession {
        ChatSession::new(self.clone())
    }

    /// Starts a conversation that continues `history`
    pub fn start_chat_with_history(&self, history: Vec<Content>) -> ChatSession {
        ChatSession::with_history(self.clone(), history)
    }
}
