use crate::landmark::LANDMARK_COUNT;

/// Errors raised at the tracking boundary.
///
/// Nothing downstream of [`crate::HandFrame`] ever sees one of these: the
/// adapter logs the error and substitutes an empty frame.
#[derive(Debug, thiserror::Error)]
pub enum GestureError {
    #[error("expected {LANDMARK_COUNT} landmarks, got {0}")]
    LandmarkCount(usize),

    #[error("malformed detection line: {0}")]
    Json(#[from] serde_json::Error),

    #[error("detector reported: {0}")]
    Detector(String),
}
