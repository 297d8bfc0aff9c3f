use std::path::PathBuf;

use anyhow::Context;
use chrono::TimeDelta;
use clap::{Parser, Subcommand};

use crate::layout::{compute_week_layout, WeekLayout};
use crate::parsers::read_feed_file;

/// Weekly calendar layout engine
#[derive(Parser)]
#[command(name = "weekgrid")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute and print the weekly layout for a feed file
    Layout {
        /// Path to the XML feed file
        feed: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the parsed feed without computing a layout
    Inspect {
        /// Path to the XML feed file
        feed: PathBuf,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Commands::Layout { feed, json } => {
                let parsed = read_feed_file(&feed)
                    .with_context(|| format!("failed to read feed {}", feed.display()))?;
                let layout = compute_week_layout(&parsed.events, parsed.current_day);
                if json {
                    println!("{}", serde_json::to_string_pretty(&layout)?);
                } else {
                    print!("{}", render_text(&layout));
                }
                Ok(())
            }
            Commands::Inspect { feed } => {
                let parsed = read_feed_file(&feed)
                    .with_context(|| format!("failed to read feed {}", feed.display()))?;
                println!(
                    "current day: {}",
                    parsed.current_day.format("%Y-%m-%d %H:%M")
                );
                println!("{} event(s):", parsed.events.len());
                for event in &parsed.events {
                    println!(
                        "  {} .. {}  {}",
                        event.start.format("%Y-%m-%d %H:%M"),
                        event.end.format("%Y-%m-%d %H:%M"),
                        event.title
                    );
                }
                Ok(())
            }
        }
    }
}

/// Per-day text view with localized-style headers ("Wed 28 Oct") and a
/// today marker. Event ends are inclusive internally; for display they are
/// pushed back to the grid boundary.
fn render_text(layout: &WeekLayout) -> String {
    let one_ms = TimeDelta::milliseconds(1);
    let today = layout.current_day_index();
    let mut out = String::new();
    for (i, day) in layout.days.iter().enumerate() {
        let marker = if i == today { " (today)" } else { "" };
        out.push_str(&format!("{}{}\n", day.start.format("%a %-d %b"), marker));
        for &idx in &day.events {
            let event = &layout.events[idx];
            out.push_str(&format!(
                "  {}-{}  {}  [column {}, span {}]\n",
                event.start.format("%H:%M"),
                (event.end + one_ms).format("%H:%M"),
                event.title,
                event.bin + 1,
                event.width
            ));
        }
    }
    out
}
