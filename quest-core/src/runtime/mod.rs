pub mod ctx;
pub mod missions;
pub mod rating;

pub use ctx::{DialogueRecord, Session};
pub use missions::{MissionBoard, MissionEntry, ResultsSummary};
pub use rating::{RatingError, StarRating};
