use serde::{Deserialize, Serialize};

/// Match analysis returned by `POST /api/score`.
///
/// Scores are nominally 0 – 100; the server owns that range and the client
/// does not re-check it. Every field is required: a body missing one fails
/// deserialization and surfaces as a malformed-response error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPayload {
    pub score: f64,
    pub similarity_score: f64,
    pub skill_match: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub interview_videos: Vec<InterviewVideo>,
    pub suggestions: Vec<String>,
}

/// A recommended video. On the wire this is a two-element `[title, url]` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct InterviewVideo {
    pub title: String,
    pub url: String,
}

impl From<(String, String)> for InterviewVideo {
    fn from((title, url): (String, String)) -> Self {
        Self { title, url }
    }
}

impl From<InterviewVideo> for (String, String) {
    fn from(video: InterviewVideo) -> Self {
        (video.title, video.url)
    }
}

/// Failure body. `error` is optional; some failures carry no body at all.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
}
