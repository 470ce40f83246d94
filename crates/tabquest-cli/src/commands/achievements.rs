use clap::Subcommand;

use super::open_tracker;

#[derive(Subcommand)]
pub enum AchievementsAction {
    /// Full badge grid (hidden entries masked until unlocked)
    List,
    /// Only unlocked achievements
    Unlocked,
}

pub fn run(action: AchievementsAction) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = open_tracker()?;
    let snap = tracker.snapshot()?;

    match action {
        AchievementsAction::List => {
            println!("{}", serde_json::to_string_pretty(&snap.achievements)?);
        }
        AchievementsAction::Unlocked => {
            let unlocked: Vec<_> = snap
                .achievements
                .iter()
                .filter(|a| a.unlocked)
                .collect();
            println!("{}", serde_json::to_string_pretty(&unlocked)?);
        }
    }
    Ok(())
}
