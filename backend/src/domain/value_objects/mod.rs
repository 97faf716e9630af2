pub mod snippet_id;
pub mod user_id;

pub use snippet_id::SnippetId;
pub use user_id::UserId;

// The role enum lives in the wire protocol; it is part of the domain too.
pub use shared::protocol::PermissionRole;
