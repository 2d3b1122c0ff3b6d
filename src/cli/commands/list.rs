//! List command implementation
//!
//! Loads the catalog, applies the requested filters and prints worksheet
//! cards. With `--verify`, cards whose PDF cannot be found are left out.

use super::shared::{
    CommandSummary, build_checker, catalog_loader, configure_colors, csv_row, emit, prepare,
    optional_progress_bar, to_json,
};
use crate::app::models::{Category, WorksheetRecord};
use crate::app::services::catalog_query::CatalogQuery;
use crate::app::services::presentation::WorksheetCard;
use crate::cli::args::{ListArgs, OutputFormat};
use crate::Result;
use colored::*;
use std::time::Instant;
use tracing::{debug, info, warn};

/// List command runner
pub async fn run_list(args: ListArgs) -> Result<CommandSummary> {
    let start_time = Instant::now();
    let config = prepare(&args.common)?;
    debug!("List arguments: {:?}", args);

    let catalog = catalog_loader(&config)?
        .load_catalog(&config.catalog_source()?)
        .await?;

    let query = build_query(&args);
    let mut selected: Vec<(usize, &WorksheetRecord)> = catalog
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| query.matches(record))
        .collect();
    info!("{} of {} records match", selected.len(), catalog.len());

    if args.verify {
        let checker = build_checker(&config)?;
        let pb = optional_progress_bar(&args.common, selected.len(), "Verifying PDFs")?;
        let found = checker
            .check_each(selected.iter().map(|(_, record)| *record), pb.as_ref())
            .await;
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        let before = selected.len();
        selected = selected
            .into_iter()
            .zip(found)
            .filter_map(|(entry, exists)| exists.then_some(entry))
            .collect();
        info!("{} of {} listed PDFs exist", selected.len(), before);
    }

    let prefix = config.site.worksheets_prefix.as_str();
    let cards: Vec<WorksheetCard> = selected
        .iter()
        .map(|(index, record)| WorksheetCard::new(*index, record, prefix))
        .collect();

    configure_colors(&args.output);
    let rendered = match args.output.format {
        OutputFormat::Human => render_human(&cards, args.guides),
        OutputFormat::Json => to_json(&cards)?,
        OutputFormat::Csv => render_csv(&cards),
    };
    emit(&args.output, &rendered)?;

    Ok(CommandSummary::new(
        "list",
        cards.len(),
        start_time.elapsed(),
    ))
}

/// Translate command-line filters into a catalog query
pub fn build_query(args: &ListArgs) -> CatalogQuery {
    let mut query = CatalogQuery::new();

    if args.guides {
        if args.subject.is_some() {
            warn!("--subject is ignored when listing parent guides");
        }
        query = query.parent_guides();
    } else if let Some(subject) = &args.subject {
        query = query.subject(subject.clone());
    }

    if let Some(grade) = args.grade {
        query = query.grade(grade);
    }
    if let Some(category) = &args.category {
        query = query.category(Category::classify(category));
    }
    if let Some(term) = &args.search {
        query = query.search(term.clone(), args.search_in.into());
    }
    if args.with_video {
        query = query.with_video();
    }
    query
}

fn render_human(cards: &[WorksheetCard], guides: bool) -> String {
    if cards.is_empty() {
        return "No worksheets match the specified filters.".to_string();
    }

    let mut output = String::new();
    for card in cards {
        let grades = if card.grades.is_empty() {
            String::new()
        } else {
            format!(" {}", card.grades.join(", ").dimmed())
        };
        let video = if card.has_video {
            format!(" {}", "▶ video".magenta())
        } else {
            String::new()
        };

        output.push_str(&format!(
            "{} {} {}{}{}\n",
            card.title.bold(),
            format!("[{}]", card.category).cyan(),
            card.subject,
            grades,
            video
        ));
        output.push_str(&format!("    {}\n", card.detail_href.dimmed()));
    }

    let noun = if guides { "parent guides" } else { "worksheets" };
    output.push_str(&format!("\n{} {}\n", cards.len().to_string().green().bold(), noun));
    output
}

fn render_csv(cards: &[WorksheetCard]) -> String {
    let mut csv = csv_row(&[
        "index",
        "title",
        "subject",
        "category",
        "grades",
        "has_video",
        "pdf_href",
        "detail_href",
    ]);
    csv.push('\n');

    for card in cards {
        csv.push_str(&csv_row(&[
            card.index.to_string(),
            card.title.clone(),
            card.subject.clone(),
            card.category.clone(),
            card.grades.join("; "),
            card.has_video.to_string(),
            card.pdf_href.clone().unwrap_or_default(),
            card.detail_href.clone(),
        ]));
        csv.push('\n');
    }
    csv
}
