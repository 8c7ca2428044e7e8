//! Value objects for the narration domain

mod narration_id;
mod speaker;
mod voice_id;

pub use narration_id::NarrationId;
pub use speaker::Speaker;
pub use voice_id::VoiceId;
