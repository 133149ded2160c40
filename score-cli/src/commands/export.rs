//! Print the current match as a score frame.

use anyhow::Result;
use std::path::Path;

use score_core::Replica;

use crate::config::{Config, MatchFile};

/// Build the hex-encoded score frame this node would transmit.
pub async fn encode(data_dir: &Path, config: &Config) -> Result<String> {
    let file = MatchFile::load(data_dir).await?;
    let replica = Replica::new(config.node.role, file.state, config.link.replica_config())
        .with_sequence(file.sequence);
    let frame = replica.score_frame();
    Ok(hex::encode(frame.to_bytes()?))
}

/// Run the export command.
pub async fn run(data_dir: &Path, config: &Config) -> Result<()> {
    println!("{}", encode(data_dir, config).await?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use score_core::{MatchState, Mode};
    use score_types::{Frame, MessageType, NodeRole};
    use tempfile::tempdir;

    #[tokio::test]
    async fn export_encodes_state_and_sender() {
        let dir = tempdir().unwrap();
        let mut state = MatchState::new();
        state.run(Mode::Normal);
        MatchFile {
            sequence: 3,
            ..MatchFile::new(state.clone())
        }
        .save(dir.path())
        .await
        .unwrap();

        let text = encode(dir.path(), &Config::default()).await.unwrap();
        let frame = Frame::from_bytes(&hex::decode(text).unwrap()).unwrap();

        assert_eq!(frame.message_type().unwrap(), MessageType::Score);
        assert_eq!(frame.sender, NodeRole::Primary.address());
        assert_eq!(frame.sequence, 3);
        assert_eq!(MatchState::from_wire(&frame.payload).unwrap(), state);
    }
}
