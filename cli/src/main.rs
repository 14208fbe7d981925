use anyhow::Result;
use chrono::Local;
use clap::Parser;
use sayreport_core::{
    daily_summaries, generate_report, AnchorPolicy, FileSource, ProductionSource, UserStatistics,
};
use std::path::PathBuf;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Parser)]
#[command(name = "sayreport")]
#[command(about = "Generate practice reports from SayBanana production logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Render a PDF report from a user production log
    Report {
        /// Path to the production log (one attempt per line)
        input: PathBuf,
        /// Where to write the PDF
        output: PathBuf,
        /// Anchor the 14-day window at today instead of the most recent activity
        #[arg(long)]
        from_today: bool,
    },
    /// Print the daily aggregates from a production log
    Stats {
        /// Path to the production log
        input: PathBuf,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Correct")]
    correct: u32,
    #[tabled(rename = "Incorrect")]
    incorrect: u32,
    #[tabled(rename = "Skipped")]
    skipped: u32,
    #[tabled(rename = "Accuracy %")]
    accuracy: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            input,
            output,
            from_today,
        } => {
            let policy = if from_today {
                AnchorPolicy::Today
            } else {
                AnchorPolicy::MostRecent
            };
            let source = FileSource::new(input);
            let today = Local::now().date_naive();
            if generate_report(&source, &output, today, policy)? {
                println!("Report written to {}", output.display());
            } else {
                println!("No usable events in the log; nothing to report.");
            }
        }
        Commands::Stats { input, json } => {
            let source = FileSource::new(input);
            let lines = source.load()?;
            let stats = UserStatistics::from_lines(&lines)?;
            let summaries = daily_summaries(&stats);
            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                println!("{} STATS:", stats.uid());
                let rows: Vec<SummaryRow> = summaries
                    .into_iter()
                    .map(|summary| SummaryRow {
                        date: summary.date,
                        day: summary.day_of_week,
                        correct: summary.words_correct,
                        incorrect: summary.words_incorrect,
                        skipped: summary.words_skipped,
                        accuracy: summary.words_accuracy_pct,
                    })
                    .collect();
                let mut table = Table::new(rows);
                table.with(Style::rounded());
                println!("{table}");
            }
        }
    }

    Ok(())
}
