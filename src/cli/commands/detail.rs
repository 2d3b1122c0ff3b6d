//! Detail command implementation
//!
//! Rebuilds a record from a detail link and shows it the way the detail page
//! does. No catalog is loaded: the link carries the whole record.

use super::shared::{CommandSummary, configure_colors, csv_row, emit, prepare, to_json};
use crate::app::models::WorksheetRecord;
use crate::app::services::presentation::{DetailView, detail_index, record_from_detail_url};
use crate::cli::args::{DetailArgs, OutputFormat};
use crate::{Error, Result};
use colored::*;
use std::time::Instant;
use tracing::{debug, info};

/// Detail command runner
pub async fn run_detail(args: DetailArgs) -> Result<CommandSummary> {
    let start_time = Instant::now();
    let config = prepare(&args.common)?;
    debug!("Detail arguments: {:?}", args);

    let record = record_from_detail_url(&args.url).ok_or_else(|| {
        Error::catalog(format!(
            "Resource Not Found: no worksheet data in '{}'",
            args.url
        ))
    })?;
    if let Some(index) = detail_index(&args.url) {
        info!("Showing catalog record {}", index);
    }

    let view = DetailView::new(&record, &config.site.worksheets_prefix);

    configure_colors(&args.output);
    let rendered = match args.output.format {
        OutputFormat::Human => render_human(&view),
        OutputFormat::Json => to_json(&view)?,
        OutputFormat::Csv => render_csv(&record),
    };
    emit(&args.output, &rendered)?;

    Ok(CommandSummary::new("detail", 1, start_time.elapsed()))
}

fn render_csv(record: &WorksheetRecord) -> String {
    let mut csv = csv_row(&["field", "value"]);
    csv.push('\n');
    for (field, value) in &record.fields {
        csv.push_str(&csv_row(&[field.as_str(), value.as_str()]));
        csv.push('\n');
    }
    csv
}

fn render_human(view: &DetailView) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", view.title.bold()));
    output.push_str(&format!(
        "{} {} {}\n",
        format!("[{}]", view.category).cyan(),
        view.subject,
        view.subject_href.dimmed()
    ));
    if !view.grades.is_empty() {
        output.push_str(&format!("Grades: {}\n", view.grades.join(", ")));
    }
    if let Some(description) = &view.description {
        output.push_str(&format!("\n{}\n", description));
    }
    if let Some(link) = &view.video_link {
        output.push_str(&format!("\n{}\n", "Related Video".bold()));
        if let Some(title) = &view.video_title {
            output.push_str(&format!("{}\n", title));
        }
        output.push_str(&format!("{}\n", view.video_embed.as_deref().unwrap_or(link).blue()));
    }
    if let Some(pdf) = &view.pdf_href {
        output.push_str(&format!("\nView PDF: {}\n", pdf.green()));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_human_shows_video_and_pdf() {
        let record = record_from_detail_url(
            "/worksheet/0?Filename=Counting+Fun&Subject=Math&Category=Ganes\
             &isKinder=TRUE&Video+Title=Counting+to+Ten\
             &Video+Link=https%3A%2F%2Fyoutu.be%2FdQw4w9WgXcQ",
        )
        .unwrap();
        colored::control::set_override(false);
        let rendered = render_human(&DetailView::new(&record, "worksheets"));

        assert!(rendered.starts_with("Counting Fun\n[Game] Math /math\n"));
        assert!(rendered.contains("Grades: K\n"));
        assert!(rendered.contains("https://www.youtube.com/embed/dQw4w9WgXcQ"));
        assert!(rendered.contains("View PDF: /worksheets/math/Counting%20Fun.pdf"));
    }

    #[test]
    fn test_render_csv_keeps_quoted_description() {
        let record = record_from_detail_url(
            "/worksheet/2?Filename=Shape+Hunt&Description=Find+%22round%22+shapes%2C+then+draw",
        )
        .unwrap();

        assert_eq!(
            render_csv(&record),
            "field,value\nFilename,Shape Hunt\nDescription,\"Find \"\"round\"\" shapes, then draw\"\n"
        );
    }
}
