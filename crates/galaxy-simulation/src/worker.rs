//! Background thread that exclusively owns the integrator

use crossbeam_channel::{Receiver, Sender};
use galaxy_physics::{Integrator, PhysicsParams};
use std::thread::{self, JoinHandle};

use crate::messages::{Command, Reply};

pub(crate) fn spawn(
    params: PhysicsParams,
    commands: Receiver<Command>,
    replies: Sender<Reply>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("galaxy-integrator".into())
        .spawn(move || run(Integrator::new(params), commands, replies))
}

/// Serve commands in arrival order until the host hangs up.
pub(crate) fn run(mut integrator: Integrator, commands: Receiver<Command>, replies: Sender<Reply>) {
    for command in commands.iter() {
        let reply = handle(&mut integrator, command);

        if replies.send(reply).is_err() {
            break;
        }
    }

    log::debug!(
        "Integrator worker exiting after {} steps",
        integrator.steps()
    );
}

fn handle(integrator: &mut Integrator, command: Command) -> Reply {
    match command {
        Command::Init {
            positions,
            velocities,
        } => match integrator.initialize(positions, velocities) {
            Ok(particle_count) => {
                log::debug!("Integrator initialized with {} stars", particle_count);
                Reply::Ready { particle_count }
            }
            Err(err) => {
                log::error!("Rejected init: {}", err);
                Reply::Failed(err)
            }
        },
        Command::Step => match integrator.step() {
            Ok(positions) => Reply::Result { positions },
            Err(err) => {
                log::error!("Rejected step: {}", err);
                Reply::Failed(err)
            }
        },
    }
}
