//! Application services

mod casting_service;
mod extraction_service;
mod narration_service;
mod synthesis_service;

pub use casting_service::CastingService;
pub use extraction_service::ExtractionService;
pub use narration_service::{NarrationConfig, NarrationResult, NarrationService};
pub use synthesis_service::{SynthesisOptions, SynthesisService};
