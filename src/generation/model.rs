//! # Content Generation Requests and Responses
//!
//! Request objects bind a [`Model`], the conversation [`Content`], safety and
//! generation settings and [`SystemInstructions`] into a JSON payload plus the
//! operation they target. Response objects are parsed from the reply with
//! explicit required/optional handling: `promptFeedback` is mandatory,
//! `candidates` defaults to empty.

use serde::{ser::SerializeSeq, ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use snafu::{OptionExt, ResultExt, Snafu};

use crate::{
    client::{ApiRequest, Model},
    models::{CitationMetadata, Content, Part, Role},
    safety::{SafetyRating, SafetySetting},
};

/// Parse errors for response payloads
#[derive(Debug, Snafu)]
pub enum ResponseError {
    #[snafu(display("response is missing the mandatory 'promptFeedback' object"))]
    MissingPromptFeedback,

    #[snafu(display("response carries an invalid 'promptFeedback': {actual}"))]
    InvalidPromptFeedback { actual: String },

    #[snafu(display("failed to deserialize response"))]
    Deserialize { source: serde_json::Error },
}

/// Usage errors raised by the single-candidate convenience accessors
#[derive(Debug, Snafu, PartialEq)]
pub enum AccessError {
    #[snafu(display(
        "the `parts()` quick accessor only works for a single candidate, but none were returned; \
         check `prompt_feedback` to see if the prompt was blocked"
    ))]
    NoCandidates,

    #[snafu(display(
        "the `parts()` quick accessor only works with a single candidate, but {count} were returned; \
         with multiple candidates use `candidates[index].content`"
    ))]
    MultipleCandidates { count: usize },

    #[snafu(display(
        "the sole candidate has no content (finish reason: {finish_reason:?}); \
         inspect `candidates[0]` directly"
    ))]
    MissingContent { finish_reason: Option<FinishReason> },

    #[snafu(display(
        "the `text()` quick accessor only works for simple (single-part) text responses, \
         but this response contains {count} parts; use `parts()` or \
         `candidates[index].content.parts()` instead"
    ))]
    MultipleParts { count: usize },

    #[snafu(display(
        "the `text()` quick accessor only works for text responses, but the sole part is not text; \
         use `parts()` or `candidates[index].content.parts()` instead"
    ))]
    NotText,
}

/// Sampling and length parameters for a request
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Number of candidates to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_count: Option<i32>,

    /// Sequences that stop generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,

    /// The maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<i32>,

    /// Controls randomness; higher values are more creative
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Nucleus sampling cutoff
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    /// Number of most likely tokens considered at each step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i32>,

    /// MIME type of the response, e.g. `application/json`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

impl GenerationConfig {
    pub fn with_candidate_count(mut self, candidate_count: i32) -> Self {
        self.candidate_count = Some(candidate_count);
        self
    }

    pub fn with_stop_sequences(mut self, stop_sequences: Vec<String>) -> Self {
        self.stop_sequences = Some(stop_sequences);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: i32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_top_k(mut self, top_k: i32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_response_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.response_mime_type = Some(mime_type.into());
        self
    }
}

/// Ordered instruction parts sent as `system_instruction`.
///
/// Serialized as a content object, `{"parts": [...]}`; an empty value is
/// still sent, as `[]`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SystemInstructions(Vec<Part>);

impl Serialize for SystemInstructions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.is_empty() {
            return serializer.serialize_seq(Some(0))?.end();
        }
        let mut state = serializer.serialize_struct("SystemInstructions", 1)?;
        state.serialize_field("parts", &self.0)?;
        state.end()
    }
}

impl SystemInstructions {
    pub fn new(parts: impl IntoIterator<Item = Part>) -> Self {
        Self(parts.into_iter().collect())
    }

    /// A single text instruction
    pub fn text(text: impl Into<String>) -> Self {
        Self(vec![Part::text(text)])
    }

    pub fn parts(&self) -> &[Part] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for SystemInstructions {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

/// Request for `models/*:generateContent`.
///
/// Contents are typed, so a request cannot be built from anything other
/// than [`Content`] turns:
///
/// ```compile_fail
/// use gemini_api::{GenerateContentRequest, Model, Part};
///
/// let request = GenerateContentRequest::new(
///     Model::GeminiPro,
///     vec![Part::text("not a turn")],
///     Vec::new(),
///     None,
///     Default::default(),
/// );
/// ```
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenerateContentRequest {
    model: Model,
    contents: Vec<Content>,
    system_instruction: SystemInstructions,
    #[serde(rename = "safetySettings", skip_serializing_if = "Vec::is_empty")]
    safety_settings: Vec<SafetySetting>,
    #[serde(rename = "generationConfig", skip_serializing_if = "is_unset")]
    generation_config: Option<GenerationConfig>,
}

fn is_unset(config: &Option<GenerationConfig>) -> bool {
    config
        .as_ref()
        .map_or(true, |config| *config == GenerationConfig::default())
}

impl GenerateContentRequest {
    pub fn new(
        model: Model,
        contents: Vec<Content>,
        safety_settings: Vec<SafetySetting>,
        generation_config: Option<GenerationConfig>,
        system_instructions: SystemInstructions,
    ) -> Self {
        Self {
            model,
            contents,
            system_instruction: system_instructions,
            safety_settings,
            generation_config,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn contents(&self) -> &[Content] {
        &self.contents
    }

    pub fn safety_settings(&self) -> &[SafetySetting] {
        &self.safety_settings
    }

    pub fn generation_config(&self) -> Option<&GenerationConfig> {
        self.generation_config.as_ref()
    }

    pub fn system_instructions(&self) -> &SystemInstructions {
        &self.system_instruction
    }
}

impl ApiRequest for GenerateContentRequest {
    fn operation(&self) -> String {
        format!("{}:generateContent", self.model)
    }

    fn http_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Request for `models/*:streamGenerateContent`; same payload as [`GenerateContentRequest`]
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(transparent)]
pub struct GenerateContentStreamRequest(GenerateContentRequest);

impl GenerateContentStreamRequest {
    pub fn new(
        model: Model,
        contents: Vec<Content>,
        safety_settings: Vec<SafetySetting>,
        generation_config: Option<GenerationConfig>,
        system_instructions: SystemInstructions,
    ) -> Self {
        Self(GenerateContentRequest::new(
            model,
            contents,
            safety_settings,
            generation_config,
            system_instructions,
        ))
    }

    pub fn model(&self) -> &Model {
        self.0.model()
    }

    pub fn contents(&self) -> &[Content] {
        self.0.contents()
    }

    pub fn safety_settings(&self) -> &[SafetySetting] {
        self.0.safety_settings()
    }

    pub fn generation_config(&self) -> Option<&GenerationConfig> {
        self.0.generation_config()
    }

    pub fn system_instructions(&self) -> &SystemInstructions {
        self.0.system_instructions()
    }
}

impl From<GenerateContentRequest> for GenerateContentStreamRequest {
    fn from(request: GenerateContentRequest) -> Self {
        Self(request)
    }
}

impl ApiRequest for GenerateContentStreamRequest {
    fn operation(&self) -> String {
        format!("{}:streamGenerateContent", self.0.model)
    }

    fn http_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Request for `models/*:countTokens`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CountTokensRequest {
    model: Model,
    contents: Vec<Content>,
}

impl CountTokensRequest {
    pub fn new(model: Model, contents: Vec<Content>) -> Self {
        Self { model, contents }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn contents(&self) -> &[Content] {
        &self.contents
    }
}

impl ApiRequest for CountTokensRequest {
    fn operation(&self) -> String {
        format!("{}:countTokens", self.model)
    }

    fn http_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Reason why the model stopped generating tokens
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    /// Default value. This value is unused.
    FinishReasonUnspecified,
    /// Natural stop point of the model or provided stop sequence
    Stop,
    /// The maximum number of tokens as specified in the request was reached
    MaxTokens,
    /// The candidate content was flagged for safety reasons
    Safety,
    /// The candidate content was flagged for recitation reasons
    Recitation,
    /// The candidate content was flagged for using an unsupported language
    Language,
    Other,
    /// The content contains forbidden terms
    Blocklist,
    ProhibitedContent,
    /// The content potentially contains sensitive personally identifiable information
    Spii,
    MalformedFunctionCall,
    ImageSafety,
    /// A reason this client does not know yet
    #[serde(other)]
    Unknown,
}

/// Why a prompt was blocked
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockReason {
    BlockReasonUnspecified,
    /// Prompt was blocked due to safety reasons
    Safety,
    Other,
    Blocklist,
    ProhibitedContent,
    ImageSafety,
    #[serde(other)]
    Unknown,
}

/// Safety feedback about the input prompt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Set when the prompt was blocked and no candidates were produced
    #[serde(default)]
    pub block_reason: Option<BlockReason>,
    #[serde(default)]
    pub safety_ratings: Vec<SafetyRating>,
}

/// One generated alternative
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// The model's turn; absent when the candidate was blocked or carries no parts
    #[serde(default, deserialize_with = "partless_as_none")]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
    #[serde(default)]
    pub safety_ratings: Vec<SafetyRating>,
    #[serde(default)]
    pub citation_metadata: Option<CitationMetadata>,
    #[serde(default)]
    pub token_count: Option<i32>,
    #[serde(default)]
    pub index: Option<i32>,
}

fn partless_as_none<'de, D>(deserializer: D) -> Result<Option<Content>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct CandidateContent {
        #[serde(default)]
        parts: Vec<Part>,
        #[serde(default)]
        role: Option<Role>,
    }

    match Option::<CandidateContent>::deserialize(deserializer)? {
        Some(content) if !content.parts.is_empty() => {
            Content::new(content.role.unwrap_or(Role::Model), content.parts)
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
        _ => Ok(None),
    }
}

/// Token accounting for a generation call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<i32>,
    pub candidates_token_count: Option<i32>,
    pub total_token_count: Option<i32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGenerateContentResponse {
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
    prompt_feedback: PromptFeedback,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

/// Parsed reply of a content generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateContentResponse {
    /// Candidates in generation rank order; empty when the prompt was blocked
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: PromptFeedback,
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Parse a decoded JSON reply.
    ///
    /// # Errors
    ///
    /// Fails when `promptFeedback` is absent, not a non-empty object, or when
    /// any field does not match its schema.
    pub fn from_value(value: Value) -> Result<Self, ResponseError> {
        match value.get("promptFeedback") {
            None | Some(Value::Null) => return MissingPromptFeedbackSnafu.fail(),
            Some(Value::Object(feedback)) if !feedback.is_empty() => {}
            Some(other) => {
                return InvalidPromptFeedbackSnafu {
                    actual: other.to_string(),
                }
                .fail()
            }
        }

        let raw: RawGenerateContentResponse =
            serde_json::from_value(value).context(DeserializeSnafu)?;

        Ok(Self {
            candidates: raw.candidates.unwrap_or_default(),
            prompt_feedback: raw.prompt_feedback,
            usage_metadata: raw.usage_metadata,
        })
    }

    /// Parts of the sole candidate
    pub fn parts(&self) -> Result<&[Part], AccessError> {
        match self.candidates.as_slice() {
            [] => NoCandidatesSnafu.fail(),
            [candidate] => candidate
                .content
                .as_ref()
                .map(Content::parts)
                .context(MissingContentSnafu {
                    finish_reason: candidate.finish_reason,
                }),
            candidates => MultipleCandidatesSnafu {
                count: candidates.len(),
            }
            .fail(),
        }
    }

    /// Text of a single-candidate, single-part text response
    pub fn text(&self) -> Result<&str, AccessError> {
        match self.parts()? {
            [part] => part.as_text().context(NotTextSnafu),
            parts => MultiplePartsSnafu { count: parts.len() }.fail(),
        }
    }
}

impl TryFrom<Value> for GenerateContentResponse {
    type Error = ResponseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

/// Reply of a token counting call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CountTokensResponse {
    pub total_tokens: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::safety::{HarmBlockThreshold, HarmCategory};
    use serde_json::json;

    fn feedback() -> Value {
        json!({"safetyRatings": [{"category": "HARM_CATEGORY_HARASSMENT", "probability": "NEGLIGIBLE"}]})
    }

    fn candidate(parts: Value) -> Value {
        json!({
            "content": {"role": "model", "parts": parts},
            "finishReason": "STOP",
            "tokenCount": 3,
            "index": 0
        })
    }

    fn payload(request: &impl ApiRequest) -> Value {
        serde_json::from_str(&request.http_payload().unwrap()).unwrap()
    }

    #[test]
    fn payload_always_carries_system_instruction() {
        let contents = vec![
            Content::text(Role::User, "hi"),
            Content::text(Role::Model, "hello"),
        ];
        let request = GenerateContentRequest::new(
            Model::GeminiPro,
            contents,
            Vec::new(),
            None,
            SystemInstructions::default(),
        );

        assert_eq!(
            payload(&request),
            json!({
                "model": "models/gemini-pro",
                "contents": [
                    {"role": "user", "parts": [{"text": "hi"}]},
                    {"role": "model", "parts": [{"text": "hello"}]}
                ],
                "system_instruction": []
            })
        );
    }

    #[test]
    fn payload_includes_settings_when_present() {
        let request = GenerateContentRequest::new(
            Model::GeminiPro,
            vec![Content::text(Role::User, "hi")],
            vec![SafetySetting::new(
                HarmCategory::HateSpeech,
                HarmBlockThreshold::BlockOnlyHigh,
            )],
            Some(GenerationConfig::default().with_temperature(0.5).with_top_k(4)),
            SystemInstructions::text("be brief"),
        );

        let payload = payload(&request);
        assert_eq!(
            payload["safetySettings"],
            json!([{"category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_ONLY_HIGH"}])
        );
        assert_eq!(
            payload["generationConfig"],
            json!({"temperature": 0.5, "topK": 4})
        );
        assert_eq!(
            payload["system_instruction"],
            json!({"parts": [{"text": "be brief"}]})
        );
    }

    #[test]
    fn operations_are_derived_from_model() {
        let request = GenerateContentRequest::new(
            Model::GeminiProVision,
            vec![Content::text(Role::User, "hi")],
            Vec::new(),
            None,
            SystemInstructions::default(),
        );
        assert_eq!(
            request.operation(),
            "models/gemini-pro-vision:generateContent"
        );
        assert_eq!(request.http_method(), reqwest::Method::POST);

        let stream: GenerateContentStreamRequest = request.clone().into();
        assert_eq!(
            stream.operation(),
            "models/gemini-pro-vision:streamGenerateContent"
        );
        assert_eq!(payload(&stream), payload(&request));

        let count = CountTokensRequest::new(Model::GeminiPro, request.contents().to_vec());
        assert_eq!(count.operation(), "models/gemini-pro:countTokens");
        assert_eq!(
            payload(&count),
            json!({
                "model": "models/gemini-pro",
                "contents": [{"role": "user", "parts": [{"text": "hi"}]}]
            })
        );
    }

    #[test]
    fn response_without_candidates_is_empty() {
        let response = GenerateContentResponse::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY", "safetyRatings": []}
        }))
        .unwrap();

        assert!(response.candidates.is_empty());
        assert_eq!(response.prompt_feedback.block_reason, Some(BlockReason::Safety));
        assert_eq!(response.parts().unwrap_err(), AccessError::NoCandidates);
        assert_eq!(response.text().unwrap_err(), AccessError::NoCandidates);
    }

    #[test]
    fn response_requires_prompt_feedback() {
        let missing = GenerateContentResponse::from_value(json!({
            "candidates": [candidate(json!([{"text": "hello"}]))]
        }));
        assert!(matches!(missing, Err(ResponseError::MissingPromptFeedback)));

        let malformed = GenerateContentResponse::from_value(json!({"promptFeedback": "blocked"}));
        assert!(matches!(
            malformed,
            Err(ResponseError::InvalidPromptFeedback { .. })
        ));

        let empty = GenerateContentResponse::from_value(json!({"promptFeedback": {}}));
        assert!(matches!(empty, Err(ResponseError::InvalidPromptFeedback { .. })));
    }

    #[test]
    fn text_returns_single_text_part() {
        let response = GenerateContentResponse::from_value(json!({
            "promptFeedback": feedback(),
            "candidates": [candidate(json!([{"text": "hello"}]))],
            "usageMetadata": {"promptTokenCount": 2, "candidatesTokenCount": 1, "totalTokenCount": 3}
        }))
        .unwrap();

        assert_eq!(response.text().unwrap(), "hello");
        assert_eq!(response.candidates[0].token_count, Some(3));
        assert_eq!(response.candidates[0].finish_reason, Some(FinishReason::Stop));
        assert_eq!(
            response.usage_metadata.as_ref().and_then(|u| u.total_token_count),
            Some(3)
        );
    }

    #[test]
    fn text_rejects_multiple_parts() {
        let response = GenerateContentResponse::from_value(json!({
            "promptFeedback": feedback(),
            "candidates": [candidate(json!([{"text": "hel"}, {"text": "lo"}]))]
        }))
        .unwrap();

        assert_eq!(response.parts().unwrap().len(), 2);
        assert_eq!(
            response.text().unwrap_err(),
            AccessError::MultipleParts { count: 2 }
        );
    }

    #[test]
    fn text_rejects_non_text_part() {
        let response = GenerateContentResponse::from_value(json!({
            "promptFeedback": feedback(),
            "candidates": [candidate(json!([{"inlineData": {"mimeType": "image/png", "data": "AA=="}}]))]
        }))
        .unwrap();

        assert_eq!(response.text().unwrap_err(), AccessError::NotText);
    }

    #[test]
    fn parts_rejects_multiple_candidates() {
        let response = GenerateContentResponse::from_value(json!({
            "promptFeedback": feedback(),
            "candidates": [
                candidate(json!([{"text": "one"}])),
                candidate(json!([{"text": "two"}]))
            ]
        }))
        .unwrap();

        let err = response.parts().unwrap_err();
        assert_eq!(err, AccessError::MultipleCandidates { count: 2 });
        assert!(err.to_string().contains("candidates[index]"));

        // the full candidate list stays reachable
        assert_eq!(
            response.candidates[1].content.as_ref().unwrap().parts()[0].as_text(),
            Some("two")
        );
    }

    #[test]
    fn parts_reports_blocked_candidate() {
        let response = GenerateContentResponse::from_value(json!({
            "promptFeedback": feedback(),
            "candidates": [{"finishReason": "SAFETY", "index": 0}]
        }))
        .unwrap();

        assert_eq!(
            response.parts().unwrap_err(),
            AccessError::MissingContent {
                finish_reason: Some(FinishReason::Safety)
            }
        );
    }

    #[test]
    fn default_generation_config_is_omitted() {
        let request = GenerateContentRequest::new(
            Model::GeminiPro,
            vec![Content::text(Role::User, "hi")],
            Vec::new(),
            Some(GenerationConfig::default()),
            SystemInstructions::default(),
        );

        let payload = payload(&request);
        assert!(payload.get("generationConfig").is_none());
        assert_eq!(payload["system_instruction"], json!([]));
    }

    #[test]
    fn partless_candidate_parses_without_content() {
        let response = GenerateContentResponse::from_value(json!({
            "promptFeedback": feedback(),
            "candidates": [{"content": {"role": "model"}, "finishReason": "MAX_TOKENS", "index": 0}]
        }))
        .unwrap();

        assert!(response.candidates[0].content.is_none());
        assert_eq!(
            response.parts().unwrap_err(),
            AccessError::MissingContent {
                finish_reason: Some(FinishReason::MaxTokens)
            }
        );

        let empty_parts = GenerateContentResponse::from_value(json!({
            "promptFeedback": feedback(),
            "candidates": [
                {"content": {"role": "model", "parts": []}, "finishReason": "STOP"},
                candidate(json!([{"text": "second"}]))
            ]
        }))
        .unwrap();
        assert!(empty_parts.candidates[0].content.is_none());
        assert_eq!(
            empty_parts.candidates[1].content.as_ref().unwrap().parts()[0].as_text(),
            Some("second")
        );
    }

    #[test]
    fn unrecognized_server_values_still_parse() {
        let response = GenerateContentResponse::from_value(json!({
            "promptFeedback": {"blockReason": "SOMETHING_NEW", "safetyRatings": []},
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "ok"}]},
                "finishReason": "UNEXPECTED_TOOL_CALL",
                "safetyRatings": [{"category": "HARM_CATEGORY_IMAGE_HATE", "probability": "SOMEWHAT_LIKELY"}]
            }]
        }))
        .unwrap();

        assert_eq!(response.prompt_feedback.block_reason, Some(BlockReason::Unknown));
        assert_eq!(response.candidates[0].finish_reason, Some(FinishReason::Unknown));
        assert_eq!(
            response.candidates[0].safety_ratings[0].category,
            HarmCategory::Unknown
        );
        assert_eq!(response.text().unwrap(), "ok");
    }
}
