//! Feed a frame received from the peer into the local match.

use anyhow::{Context, Result};
use std::path::Path;

use score_core::{Action, Event, Replica, ReplicaEvent};
use score_types::Frame;

use crate::commands::status::scoreline;
use crate::config::{Config, MatchFile};

/// Run the import command with a hex-encoded frame.
pub async fn run(data_dir: &Path, config: &Config, frame_hex: &str) -> Result<()> {
    let bytes = hex::decode(frame_hex.trim()).context("Frame is not valid hex")?;
    let frame = Frame::from_bytes(&bytes).context("Frame failed to decode")?;

    let file = MatchFile::load(data_dir).await?;
    let mut replica = Replica::new(config.node.role, file.state, config.link.replica_config())
        .with_sequence(file.sequence)
        .with_link(file.link);

    let actions = replica.on_event(Event::FrameReceived { frame });
    for action in &actions {
        match action {
            Action::Transmit(reply) => {
                println!("reply: {}", hex::encode(reply.to_bytes()?));
            }
            Action::EmitEvent(event) => println!("{}", describe(event)),
            Action::StartRetryTimer { .. } | Action::CancelRetryTimer => {}
        }
    }
    println!("{}", scoreline(replica.state()));

    MatchFile {
        sequence: replica.sequence(),
        link: replica.link(),
        state: replica.into_state(),
    }
    .save(data_dir)
    .await
}

fn describe(event: &ReplicaEvent) -> String {
    match event {
        ReplicaEvent::Replaced { from, sequence } => {
            format!("replaced by {} (sequence {})", from, sequence)
        }
        ReplicaEvent::InSync { sequence } => format!("in sync at sequence {}", sequence),
        ReplicaEvent::Diverged { local, remote } => format!(
            "DIVERGED: local {}/{} vs peer {}/{}",
            local.runs, local.wickets, remote.runs, remote.wickets
        ),
        ReplicaEvent::PeerUnreachable { attempts } => {
            format!("peer unreachable after {} attempts", attempts)
        }
        ReplicaEvent::Rejected { reason } => format!("rejected: {}", reason),
    }
}
