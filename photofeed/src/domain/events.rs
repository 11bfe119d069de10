//! Typed change notifications published by the services.
//!
//! Subscribers pattern-match on the variant; there is no untyped payload
//! to inspect.

/// Change notification from the image list service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedEvent {
    /// The list size changed (a page arrived, or the list was reset).
    /// Counts describe the service's own store at publish time; a
    /// subscriber reconciles against its own snapshot.
    BulkUpdate { old_count: usize, new_count: usize },
    /// The like state of the photo at `index` changed.
    LikeUpdate { index: usize },
}

/// Change notification from the avatar service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarEvent {
    Updated,
}
