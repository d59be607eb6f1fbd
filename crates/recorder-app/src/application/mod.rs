//! Application layer use cases for the recorder backend.
//!
//! Use cases here orchestrate `recorder_core` domain types to fulfil a user
//! goal.  They depend on traits ([`manage_streamers::StreamerStore`]) rather
//! than on the file system, so they are tested against in-memory stores.
//!
//! # Sub-modules
//!
//! - **`manage_streamers`** – Adds, removes and edits followed streamers with
//!   a load-modify-save cycle per operation.
//!
//! - **`plan_recording`** – Renders the VOD path template for a stream and
//!   validates the result against the user's root folder.

pub mod manage_streamers;
pub mod plan_recording;
