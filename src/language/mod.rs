pub mod core;
pub mod detector;
pub mod frequency;
pub mod normalizer;

// Re-export the main types for convenience
pub use self::core::Language;
pub use self::detector::detect;
pub use self::frequency::{table_for, FrequencyTable};
pub use self::normalizer::{normalize, NormalizedText};
