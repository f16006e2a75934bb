//! Terminal transcription workspace: an upload dialog feeding a remote
//! transcription service, a collapsible transcript panel, and template
//! completion over the combined transcript and notes.

pub mod api;
pub mod command;
pub mod widget;
pub mod workspace;
