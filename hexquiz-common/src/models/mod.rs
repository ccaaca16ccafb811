//! Domain models shared by the core components and the HTTP layer

pub mod observation;
pub mod overlap;
pub mod quiz;
pub mod taxon;

pub use observation::{DiversifiedResult, ObservationRecord, PhotoRef};
pub use overlap::OverlapVerdict;
pub use quiz::{sanitize_name, QuizQuestion, QuizSetup};
pub use taxon::{parse_ancestry, Rank, TaxonDescriptor, TaxonId, TaxonRecord};
