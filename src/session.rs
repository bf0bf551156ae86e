use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Instant;

use log::debug;

use crate::game::{Game, Snapshot};
use crate::input::Command;
use crate::scheduler::IntervalTimer;

/// Drives `game` until the command channel disconnects.
///
/// Commands and ticks are handled strictly one at a time on the calling
/// thread, so a tick never overlaps a command or another tick. `sink` receives
/// the initial snapshot, one after every executed step, and one after every
/// command that changes the lifecycle state. Returns the final snapshot.
pub fn run_session<F>(
    game: &mut Game<IntervalTimer>,
    commands: &Receiver<Command>,
    mut sink: F,
) -> Snapshot
where
    F: FnMut(&Snapshot),
{
    sink(&game.snapshot());

    loop {
        let now = Instant::now();
        if game.scheduler_mut().fire(now) {
            if game.tick().is_some() {
                sink(&game.snapshot());
            }
            continue;
        }

        let received = match game.scheduler().time_until_due(now) {
            Some(wait) => commands.recv_timeout(wait),
            None => commands.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(command) => {
                let before = game.state();
                game.apply(command);
                if game.state() != before {
                    sink(&game.snapshot());
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                debug!("command source closed; ending session");
                break;
            }
        }
    }

    game.snapshot()
}
