pub mod card;
pub mod review;

pub use card::{Deck, Flashcard};
pub use review::{ReviewLog, ReviewOutcome, StudySession};
