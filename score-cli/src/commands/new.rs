//! Start a new innings.

use anyhow::Result;
use std::path::Path;

use score_core::{MatchState, Overs};

use crate::commands::status::scoreline;
use crate::config::MatchFile;

/// Run the new command. `chase` seeds the target for a second innings.
pub async fn run(data_dir: &Path, chase: Option<(u16, Overs)>) -> Result<()> {
    if MatchFile::exists(data_dir).await {
        tracing::info!("replacing existing match record");
    }

    let state = match chase {
        Some((target, deadline)) => MatchState::chasing(target, deadline),
        None => MatchState::new(),
    };
    MatchFile::new(state.clone()).save(data_dir).await?;

    println!("New innings started.");
    println!();
    println!("  Score:    {}", scoreline(&state));
    if let Some((target, deadline)) = chase {
        println!("  Target:   {} in {} overs", target, deadline);
    }
    println!("  Data dir: {}", data_dir.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use score_core::Mode;
    use tempfile::tempdir;

    #[tokio::test]
    async fn new_creates_zero_match() {
        let dir = tempdir().unwrap();
        run(dir.path(), None).await.unwrap();

        let file = MatchFile::load(dir.path()).await.unwrap();
        assert_eq!(file.sequence, 0);
        assert_eq!(file.state, MatchState::new());
    }

    #[tokio::test]
    async fn new_seeds_chase() {
        let dir = tempdir().unwrap();
        run(dir.path(), Some((180, Overs::new(20, 0).unwrap())))
            .await
            .unwrap();

        let file = MatchFile::load(dir.path()).await.unwrap();
        assert_eq!(file.state.target(), 180);
        assert_eq!(file.state.target_overs(), 20);
    }

    #[tokio::test]
    async fn new_replaces_existing_match() {
        let dir = tempdir().unwrap();
        let mut state = MatchState::new();
        state.run(Mode::Normal);
        MatchFile::new(state).save(dir.path()).await.unwrap();

        run(dir.path(), None).await.unwrap();
        let file = MatchFile::load(dir.path()).await.unwrap();
        assert_eq!(file.state.runs(), 0);
    }
}
