// Admin REST API surface — the console's listing glue.
//
// client wraps HTTP; the other submodules each cover one listing area of
// the admin API. Report fetching and actions live behind the repository
// seam in the moderation module instead, because the session is written
// against a trait.

pub mod client;
pub mod content;
pub mod overview;
pub mod stories;
pub mod users;
