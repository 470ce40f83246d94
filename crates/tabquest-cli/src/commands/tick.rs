use chrono::{Local, NaiveDateTime};
use clap::Args;
use tabquest_core::tick::TickContext;
use tabquest_core::{classify, Settings};

use super::open_tracker;

#[derive(Args)]
pub struct TickArgs {
    /// URL of the active tab; omit when no tab is focused
    #[arg(long)]
    pub url: Option<String>,
    /// Mark the user as idle (the tick becomes a no-op)
    #[arg(long)]
    pub idle: bool,
    /// Override the tick's local timestamp (RFC 3339 naive, for testing)
    #[arg(long)]
    pub at: Option<String>,
}

#[derive(Args)]
pub struct SwitchArgs {
    /// URL of the newly focused tab; omit on focus loss
    #[arg(long)]
    pub url: Option<String>,
    /// Override the local timestamp (for testing)
    #[arg(long)]
    pub at: Option<String>,
}

fn parse_at(at: Option<&str>) -> Result<NaiveDateTime, Box<dyn std::error::Error>> {
    match at {
        Some(raw) => Ok(raw.parse()?),
        None => Ok(Local::now().naive_local()),
    }
}

pub fn run(args: TickArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = open_tracker()?;
    let ctx = TickContext {
        url: args.url,
        user_active: !args.idle,
        now: parse_at(args.at.as_deref())?,
    };
    let report = tracker.tick(&ctx)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub fn run_switch(args: SwitchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut tracker = open_tracker()?;
    let now = parse_at(args.at.as_deref())?;
    tracker.context_change(args.url.as_deref(), now)?;
    println!("ok");
    Ok(())
}

pub fn run_classify(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load_or_default();
    let category = classify(url, &settings.custom_categories);
    println!("{}", category.label());
    Ok(())
}
