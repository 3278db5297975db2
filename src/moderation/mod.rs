// Report moderation — the console's core.
//
// model defines the wire shapes, target turns polymorphic report targets
// into a tagged union at the decode boundary, repository is the backend
// seam, and session is the state machine that keeps every report view
// consistent.

pub mod model;
pub mod repository;
pub mod session;
pub mod target;
