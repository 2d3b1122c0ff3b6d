//! Videos command implementation
//!
//! Without a standalone list, prints the deduplicated videos referenced by
//! the catalog. With `--videos` (or `catalog.videos_source`), prints that list
//! joined to the worksheets whose video title mentions each video.

use super::shared::{
    CommandSummary, catalog_loader, configure_colors, csv_row, emit, prepare, to_json,
};
use crate::app::models::{Catalog, Video, WorksheetRecord};
use crate::app::services::catalog_loader::CatalogSource;
use crate::app::services::catalog_query::{
    associate_videos, embed_url, youtube_video_id,
};
use crate::cli::args::{OutputFormat, VideosArgs};
use crate::Result;
use colored::*;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

/// A video with the worksheets that use it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoRow {
    pub title: String,
    pub link: String,
    pub embed_url: Option<String>,
    pub worksheets: Vec<String>,
}

impl VideoRow {
    fn new(video: &Video, worksheets: &[&WorksheetRecord]) -> Self {
        Self {
            title: video.title.clone(),
            link: video.link.clone(),
            embed_url: youtube_video_id(&video.link).map(|id| embed_url(&id)),
            worksheets: worksheets
                .iter()
                .map(|ws| ws.display_title().to_string())
                .collect(),
        }
    }
}

/// Videos command runner
pub async fn run_videos(args: VideosArgs) -> Result<CommandSummary> {
    let start_time = Instant::now();
    let config = prepare(&args.common)?;
    debug!("Videos arguments: {:?}", args);

    let loader = catalog_loader(&config)?;
    let catalog = loader.load_catalog(&config.catalog_source()?).await?;

    let videos_source = match &args.videos {
        Some(value) => Some(CatalogSource::parse(value)?),
        None => config.videos_source()?,
    };

    let rows = match videos_source {
        Some(source) => {
            let videos = loader.load_videos(&source).await?;
            info!("Joining {} videos with catalog worksheets", videos.len());
            associate_videos(&videos, &catalog.records)
                .iter()
                .map(|assoc| VideoRow::new(assoc.video, &assoc.worksheets))
                .collect()
        }
        None => catalog_video_rows(&catalog),
    };

    configure_colors(&args.output);
    let rendered = match args.output.format {
        OutputFormat::Human => render_human(&rows),
        OutputFormat::Json => to_json(&rows)?,
        OutputFormat::Csv => render_csv(&rows),
    };
    emit(&args.output, &rendered)?;

    Ok(CommandSummary::new("videos", rows.len(), start_time.elapsed()))
}

/// Catalog videos, each with the worksheets linking to it
pub fn catalog_video_rows(catalog: &Catalog) -> Vec<VideoRow> {
    catalog
        .videos()
        .iter()
        .map(|video| {
            let users: Vec<&WorksheetRecord> = catalog
                .records
                .iter()
                .filter(|r| r.video_link.as_deref() == Some(video.link.as_str()))
                .collect();
            VideoRow::new(video, &users)
        })
        .collect()
}

fn render_human(rows: &[VideoRow]) -> String {
    if rows.is_empty() {
        return "No videos found.".to_string();
    }

    let mut output = String::new();
    for row in rows {
        output.push_str(&format!("{}\n", row.title.bold()));
        output.push_str(&format!("    {}\n", row.link.blue()));
        if let Some(embed) = &row.embed_url {
            output.push_str(&format!("    embed: {}\n", embed.dimmed()));
        }
        for worksheet in &row.worksheets {
            output.push_str(&format!("    - {}\n", worksheet));
        }
    }
    output.push_str(&format!("\n{} videos\n", rows.len().to_string().green().bold()));
    output
}

fn render_csv(rows: &[VideoRow]) -> String {
    let mut csv = csv_row(&["title", "link", "embed_url", "worksheets"]);
    csv.push('\n');
    for row in rows {
        csv.push_str(&csv_row(&[
            row.title.clone(),
            row.link.clone(),
            row.embed_url.clone().unwrap_or_default(),
            row.worksheets.join("; "),
        ]));
        csv.push('\n');
    }
    csv
}
