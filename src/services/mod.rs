//! Services that drive the review scheduler against storage.

pub mod review;
pub mod study;

pub use review::ReviewService;
pub use study::StudyService;
