use std::sync::LazyLock;

use regex::Regex;

/// Recognises `youtu.be/<id>`, `/v/<id>`, `/u/x/<id>`, `/embed/<id>`,
/// `watch?v=<id>` and `&v=<id>`.
static VIDEO_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(youtu.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*")
        .expect("video id pattern is valid")
});

const VIDEO_ID_LEN: usize = 11;

/// Pulls the 11-character video id out of a link, or `None` when the link
/// does not look like a video link.
pub fn extract_video_id(url: &str) -> Option<String> {
    let caps = VIDEO_ID.captures(url)?;
    let id = caps.get(2)?.as_str();
    (id.chars().count() == VIDEO_ID_LEN).then(|| id.to_string())
}

pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{video_id}?rel=0")
}
