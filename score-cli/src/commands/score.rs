//! Apply one scoring command to the match.

use anyhow::{bail, Result};
use std::path::Path;

use score_core::{Action, Command, Event, Mode, Replica};

use crate::commands::status::scoreline;
use crate::config::{Config, MatchFile};

/// Run the score command.
///
/// `repeat` marks an extra as a repeated press rather than a fresh event.
/// It is only accepted together with an extra.
pub async fn run(
    data_dir: &Path,
    config: &Config,
    command: Command,
    mode: Mode,
    repeat: bool,
) -> Result<()> {
    let command = match command {
        Command::Extra { .. } => Command::Extra {
            first_press: !repeat,
        },
        other if repeat => bail!("--repeat only applies to extra, not {}", other),
        other => other,
    };

    let file = MatchFile::load(data_dir).await?;
    let mut replica = Replica::new(config.node.role, file.state, config.link.replica_config())
        .with_sequence(file.sequence)
        .with_link(file.link);
    let actions = replica.on_event(Event::Local { command, mode });
    tracing::debug!(%command, %mode, sequence = replica.sequence(), "scored");

    println!("{}", scoreline(replica.state()));
    for action in &actions {
        if let Action::Transmit(frame) = action {
            println!("frame: {}", hex::encode(frame.to_bytes()?));
        }
    }

    MatchFile {
        sequence: replica.sequence(),
        link: replica.link(),
        state: replica.into_state(),
    }
    .save(data_dir)
    .await
}
