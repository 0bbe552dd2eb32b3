//! # Prelude for the Gemini API Crate
//!
//! This module re-exports the most commonly used types for convenience.
//!
//! ```rust,ignore
//! use gemini_api::prelude::*;
//! ```

pub use crate::chat::ChatSession;
pub use crate::client::{Error as ClientError, Gemini, Model};
pub use crate::generation::{
    GenerateContentResponse, GenerationConfig, GenerativeModel, SystemInstructions,
};
pub use crate::models::{Blob, Content, Part, Role};
pub use crate::safety::{HarmBlockThreshold, HarmCategory, SafetySetting};
