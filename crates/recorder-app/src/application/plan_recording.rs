//! PlanRecordingUseCase: decides where a recording of a live stream goes.
//!
//! The VOD path template from the preferences is rendered with the streamer
//! and stream details, then checked by the [`PathValidator`] against the
//! user's root folder.  Only a path that passes validation is ever handed to
//! the recorder.

use recorder_core::{
    render_template, PathError, PathValidator, Preferences, Streamer, TemplateError, TemplateVars,
};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("invalid VOD path template: {0}")]
    Template(#[from] TemplateError),
    #[error("rejected recording path: {0}")]
    Path(#[from] PathError),
}

/// When and what is being recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamInfo {
    /// Start date, `YYYY-MM-DD`.
    pub date: String,
    /// Start time, `HH-MM-SS`.
    pub time: String,
    pub title: String,
}

/// A validated destination for one recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingPlan {
    /// Sanitized path relative to the root folder.
    pub relative_path: String,
    /// `relative_path` joined under the root folder.
    pub full_path: String,
}

pub fn plan_recording(
    validator: &PathValidator,
    preferences: &Preferences,
    streamer: &Streamer,
    stream: &StreamInfo,
) -> Result<RecordingPlan, PlanError> {
    let vars = TemplateVars {
        platform: streamer.platform.clone(),
        username: streamer.username.clone(),
        date: stream.date.clone(),
        time: stream.time.clone(),
        title: stream.title.clone(),
    };
    let rendered = render_template(&preferences.vod_path_template, &vars)?;

    let relative_path = validator
        .validate(&preferences.root_folder, &rendered)
        .map_err(|e| {
            warn!(streamer = %streamer.id(), %rendered, "recording path rejected: {e}");
            e
        })?;
    let full_path = validator.resolve(&preferences.root_folder, &relative_path);
    debug!(streamer = %streamer.id(), %full_path, "recording planned");

    Ok(RecordingPlan {
        relative_path,
        full_path,
    })
}
