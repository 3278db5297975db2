// Cinder: report moderation console for a social platform backend
//
// This is the library root. The moderation module is the core the console
// is built around; api and output are the REST and terminal edges.

pub mod api;
pub mod config;
pub mod moderation;
pub mod output;
