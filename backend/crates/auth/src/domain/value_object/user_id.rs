use kernel::id::Id;

/// Marker for user identifiers (`users.user_id`)
pub struct UserMarker;
pub type UserId = Id<UserMarker>;
