//! # gemini-api
//!
//! A Rust client library for Google's Gemini generative AI API.
//!
//! Configure a [`GenerativeModel`] once, then generate content directly or
//! hold a multi-turn conversation through a [`ChatSession`]:
//!
//! ```rust,no_run
//! use gemini_api::{Gemini, GenerationConfig, Model, Part};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Gemini::new(std::env::var("GEMINI_API_KEY")?)?;
//! let model = client
//!     .generative_model(Model::GeminiPro)
//!     .with_generation_config(GenerationConfig::default().with_temperature(0.2));
//!
//! let response = model.generate_content([Part::text("Why is the sky blue?")]).await?;
//! println!("{}", response.text()?);
//!
//! let mut chat = model.start_chat();
//! chat.send_message([Part::text("Hello!")]).await?;
//! # Ok(())
//! # }
//! ```

mod chat;
mod client;
mod generation;
mod models;
pub mod prelude;
mod safety;


pub use chat::ChatSession;
pub use client::{
    ApiRequest, CustomModel, Error as ClientError, Gemini, GenerationStream, HttpRequest,
    HttpTransport, Model, Transport,
};
pub use generation::{
    AccessError, BlockReason, Candidate, CountTokensRequest, CountTokensResponse, FinishReason,
    GenerateContentRequest, GenerateContentResponse, GenerateContentStreamRequest,
    GenerationConfig, GenerativeModel, PromptFeedback, ResponseError, SystemInstructions,
    UsageMetadata,
};
pub use models::{Blob, CitationMetadata, CitationSource, Content, ContentError, FileData, Part, Role};
pub use safety::{HarmBlockThreshold, HarmCategory, HarmProbability, SafetyRating, SafetySetting};
