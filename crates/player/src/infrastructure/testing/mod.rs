//! Test doubles shared across unit tests

mod recording_view;

pub use recording_view::RecordingView;
