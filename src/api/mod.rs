pub mod scores_api;

pub use scores_api::{FeedError, ScoresApiClient};
