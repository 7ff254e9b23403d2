pub mod composer;
pub mod prompt;
pub mod types;

pub use composer::{LLMStudySheetComposer, StudySheetComposer};
pub use types::{Focus, StudySheetPreferences, Tone};
