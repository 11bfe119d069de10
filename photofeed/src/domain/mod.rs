pub mod events;
pub mod models;

pub use events::{AvatarEvent, FeedEvent};
pub use models::{Photo, PhotoSize, Profile, ProfileViewModel};
