//! Video listings and worksheet/video association

use crate::app::models::{Video, WorksheetRecord};
use crate::constants::{YOUTUBE_EMBED_BASE, YOUTUBE_ID_LENGTH};
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

/// Accepts youtu.be short links, watch links, `/v/`, `/u/x/` and embed links.
/// The id is the seventh capture group.
static YOUTUBE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*((youtu.be/)|(v/)|(/u/\w/)|(embed/)|(watch\?))\??v?=?([^#&?]*).*")
        .expect("YouTube URL pattern is valid")
});

/// Videos referenced by worksheet records, deduplicated by link
pub fn video_listing(records: &[WorksheetRecord]) -> Vec<Video> {
    let videos = records.iter().filter_map(|record| {
        let link = record.video_link.as_ref()?;
        let title = record
            .video_title
            .clone()
            .unwrap_or_else(|| record.display_title().to_string());
        Some(Video::new(title, link.clone()))
    });
    dedupe_by_link(videos)
}

/// Keep the first video for each exact link, preserving first-seen order
pub fn dedupe_by_link<I>(videos: I) -> Vec<Video>
where
    I: IntoIterator<Item = Video>,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    let mut duplicates = 0usize;

    for video in videos {
        if seen.insert(video.link.clone()) {
            unique.push(video);
        } else {
            duplicates += 1;
        }
    }

    debug!(
        "Video listing: {} unique, {} duplicates dropped",
        unique.len(),
        duplicates
    );
    unique
}

/// A video with the worksheets whose stored video title mentions it
#[derive(Debug, Clone, Serialize)]
pub struct VideoAssociation<'a> {
    pub video: &'a Video,
    pub worksheets: Vec<&'a WorksheetRecord>,
}

/// Join videos to worksheets by case-insensitive substring of the video title
///
/// A worksheet belongs to a video when its "Video Title" contains the video's
/// title. This is an approximate join: one worksheet may match several videos.
/// Videos with an empty title match nothing.
pub fn associate_videos<'a>(
    videos: &'a [Video],
    worksheets: &'a [WorksheetRecord],
) -> Vec<VideoAssociation<'a>> {
    videos
        .iter()
        .map(|video| {
            let needle = video.title.trim().to_lowercase();
            let matched = if needle.is_empty() {
                Vec::new()
            } else {
                worksheets
                    .iter()
                    .filter(|ws| {
                        ws.video_title
                            .as_deref()
                            .is_some_and(|title| title.to_lowercase().contains(&needle))
                    })
                    .collect()
            };
            VideoAssociation {
                video,
                worksheets: matched,
            }
        })
        .collect()
}

/// Extract the 11-character YouTube id from a video link
pub fn youtube_video_id(url: &str) -> Option<String> {
    let captures = YOUTUBE_URL.captures(url.trim())?;
    let id = captures.get(7)?.as_str();
    (id.len() == YOUTUBE_ID_LENGTH).then(|| id.to_string())
}

/// Embeddable player URL for a YouTube id
pub fn embed_url(video_id: &str) -> String {
    format!("{}{}", YOUTUBE_EMBED_BASE, video_id)
}
