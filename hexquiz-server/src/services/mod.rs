//! Core components: resolution, diversification, overlap checks, quiz picks

pub mod diversifier;
pub mod gallery;
pub mod overlap_detector;
pub mod quiz_picker;
pub mod random;
pub mod taxon_resolver;

#[cfg(test)]
pub(crate) mod fakes;

pub use diversifier::ObservationDiversifier;
pub use gallery::Gallery;
pub use quiz_picker::{PickError, QuizQuestionPicker};
pub use random::RandomSource;
pub use taxon_resolver::TaxonResolver;
