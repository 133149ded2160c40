//! Show the current score.

use anyhow::Result;
use std::path::Path;

use score_core::MatchState;

use crate::config::MatchFile;

/// Run the status command.
pub async fn run(data_dir: &Path) -> Result<()> {
    if !MatchFile::exists(data_dir).await {
        println!("Match: NOT STARTED");
        println!();
        println!("Run 'scoreboard new' to start an innings.");
        return Ok(());
    }
    let file = MatchFile::load(data_dir).await?;
    let state = &file.state;

    println!("=== scoreboard status ===");
    println!();
    println!("  Score:    {}", scoreline(state));
    println!("  Extras:   {}", state.extras());
    println!("  Wd/NB:    {} this over", state.wide_nb_this_over());
    println!("  CRR:      {:.2}", state.current_run_rate());
    if state.target() > 0 {
        println!(
            "  Target:   {} in {} overs",
            state.target(),
            state.target_clock()
        );
        println!("  RRR:      {:.2}", state.target_run_rate());
    }
    println!("  Sequence: {}", file.sequence);

    Ok(())
}

/// Format the headline score, e.g. `42/3 (7.2 ov)`.
pub fn scoreline(state: &MatchState) -> String {
    format!(
        "{}/{} ({} ov)",
        state.runs(),
        state.wickets(),
        state.clock()
    )
}
