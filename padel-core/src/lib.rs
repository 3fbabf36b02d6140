pub mod export;
pub mod lineup;
pub mod scoring;
pub mod stats;

// Re-export main components
pub use export::*;
pub use lineup::*;
pub use scoring::*;
pub use stats::*;
