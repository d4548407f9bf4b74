//! Per-request orchestration between the vision and translation services.
//!
//! Each run is stateless and issues its outbound calls strictly in sequence.

pub mod celebrity;
pub mod describe;
pub mod language;

pub use celebrity::find_celebrity;
pub use describe::describe_image;
pub use language::TargetLanguage;
