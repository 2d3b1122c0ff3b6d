use clap::Parser;
use std::process;
use tracing::info;
use worksheet_catalog::cli::{args::Args, commands};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let shutdown_signal = async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => eprintln!("\nReceived CTRL+C, shutting down..."),
                // Without a signal handler, never resolve and let the command finish
                Err(e) => {
                    eprintln!("Failed to install CTRL+C signal handler: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };

        tokio::select! {
            result = commands::run(args) => result,
            _ = shutdown_signal => Err(worksheet_catalog::Error::processing_interrupted(
                "Interrupted by user",
            )),
        }
    });

    match result {
        Ok(summary) => {
            info!(
                "{} finished: {} items in {:.2}s",
                summary.command,
                summary.items,
                summary.duration.as_secs_f64()
            );
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Worksheet Catalog - SLAM worksheet library tooling");
    println!("==================================================");
    println!();
    println!("Browse the worksheet catalog CSV, check that every listed PDF exists,");
    println!("and keep the CSV tidy.");
    println!();
    println!("USAGE:");
    println!("    worksheet-catalog <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    list            List worksheets matching subject, grade, category or text");
    println!("    videos          List videos referenced by the catalog");
    println!("    check           Report which catalog PDFs exist");
    println!("    detail          Show the record carried by a detail link");
    println!("    clean           Remove rows whose PDF is missing");
    println!("    fix-filenames   Remove whitespace before .pdf in filenames");
    println!("    migrate-grades  Rewrite Grade Level text as grade flag columns");
    println!();
    println!("EXAMPLES:");
    println!("    # Kindergarten math worksheets that have a video:");
    println!("    worksheet-catalog list --subject math --grade K --with-video");
    println!();
    println!("    # Check PDFs on the live site:");
    println!("    worksheet-catalog check --base-url https://slam.example.org --missing-only");
    println!();
    println!("    # Preview a cleanup without touching the CSV:");
    println!("    worksheet-catalog clean --dry-run");
    println!();
    println!("For detailed help on any command, use:");
    println!("    worksheet-catalog <COMMAND> --help");
}
