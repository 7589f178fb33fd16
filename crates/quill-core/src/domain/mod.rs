//! Domain entities - the core business objects.

mod account;
mod post;
mod session;
mod slug;

pub use account::Account;
pub use post::{Post, PostChanges, PostDraft, PostWithAuthor};
pub use session::{RequestContext, Session};
pub use slug::slugify;
