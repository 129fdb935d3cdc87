//! Well-known bus topic name constants.
//!
//! These must match the channel names the submitting service publishes on
//! and the frontends subscribe to; changing them is a wire-protocol break.

/// Inbound job submissions consumed by the intake loop.
pub const TOPIC_JOB_SUBMISSIONS: &str = "video_jobs";

/// Outbound status updates, one message per status write.
pub const TOPIC_JOB_UPDATES: &str = "job_updates";
