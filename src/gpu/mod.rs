//! GPU plumbing: device/surface ownership and shared pipeline helpers.

pub mod pipeline_helpers;
pub mod render_context;
