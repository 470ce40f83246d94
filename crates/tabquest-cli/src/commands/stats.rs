use clap::Subcommand;

use super::open_tracker;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Full dashboard snapshot as JSON
    Show,
    /// Short human-readable summary
    Summary,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let tracker = open_tracker()?;
    let snap = tracker.snapshot()?;

    match action {
        StatsAction::Show => {
            println!("{}", serde_json::to_string_pretty(&snap)?);
        }
        StatsAction::Summary => {
            println!(
                "Level {} {} ({}%) -- {} XP, {} lifetime",
                snap.level, snap.rank_title, snap.level_progress, snap.xp, snap.total_xp_earned
            );
            println!(
                "Streak {} (best {}), combo x{:.2} (best {} min)",
                snap.current_streak, snap.longest_streak, snap.combo_multiplier, snap.highest_combo
            );
            println!(
                "Focus {} ({} -- {}), trend {:?}",
                snap.focus_score, snap.focus_grade.letter, snap.focus_grade.label, snap.trend
            );
            println!(
                "Today: {} productive / {} neutral / {} distracting minutes",
                snap.today.productive_minutes,
                snap.today.neutral_minutes,
                snap.today.distracting_minutes
            );
            if let Some((threshold, label)) = snap.next_milestone {
                println!("Next milestone: {label} at {threshold} XP");
            }
            for domain in &snap.top_domains {
                println!(
                    "  {} -- {} XP over {} min ({} visits)",
                    domain.domain, domain.total_xp, domain.total_minutes, domain.visits
                );
            }
        }
    }
    Ok(())
}
