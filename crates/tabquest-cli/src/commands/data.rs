use clap::Subcommand;

use super::open_tracker;

#[derive(Subcommand)]
pub enum DataAction {
    /// Dump the full progression state as JSON (backup)
    Export,
    /// Wipe all progression state back to defaults
    Reset {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: DataAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DataAction::Export => {
            let tracker = open_tracker()?;
            println!("{}", tracker.export()?);
        }
        DataAction::Reset { yes } => {
            if !yes {
                eprintln!("refusing to wipe progression state without --yes");
                std::process::exit(1);
            }
            let mut tracker = open_tracker()?;
            tracker.reset()?;
            println!("progression state reset");
        }
    }
    Ok(())
}
