//! Vision extraction: send the market map to a chat completion model and
//! turn its answer into candidate startup names.

mod openai;
mod parse;

pub use openai::{OpenAiVision, VisionClient};
pub use parse::{completion_text, parse_candidates};
