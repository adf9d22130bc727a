// Library surface: the scoring engine, the phrase store and the backfill driver.
// The binary in main.rs is a thin CLI over these.
pub mod app_dirs;
pub mod backfill;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod formats;
pub mod language;
pub mod store;

pub use difficulty::{
    detect_language, label, score, score_batch, score_with_breakdown, DifficultyLabel,
    DifficultyScore, PhraseInput, ScoreBreakdown, ScoredPhrase,
};
pub use error::{Error, Result};
pub use language::Language;
