pub mod model;

pub use model::{HarmBlockThreshold, HarmCategory, HarmProbability, SafetyRating, SafetySetting};
