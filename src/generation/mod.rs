pub mod builder;
pub mod model;

pub use builder::GenerativeModel;
pub use model::{
    AccessError, BlockReason, Candidate, CountTokensRequest, CountTokensResponse, FinishReason,
    GenerateContentRequest, GenerateContentResponse, GenerateContentStreamRequest,
    GenerationConfig, PromptFeedback, ResponseError, SystemInstructions, UsageMetadata,
};
