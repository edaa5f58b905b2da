//! Render-side handle to the integrator worker
//!
//! The render loop calls [`SimulationHost::frame`] once per animation frame.
//! At most one step request is in flight: while a step is still running the
//! frame reuses the last published positions and issues no new request.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError, TrySendError};
use galaxy_physics::{ParticleSet, PhysicsParams};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::error::HostError;
use crate::messages::{Command, Reply};
use crate::worker;

/// Room for the init message plus the single outstanding step
const CHANNEL_CAPACITY: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPhase {
    /// Worker running, no buffers handed over yet
    Idle,
    /// Init sent, waiting for the worker to report ready
    Starting,
    Ready,
}

pub struct SimulationHost {
    commands: Option<Sender<Command>>,
    replies: Receiver<Reply>,
    worker: Option<JoinHandle<()>>,

    phase: HostPhase,
    particle_count: usize,
    step_in_flight: bool,
    steps_requested: u64,
    steps_completed: u64,

    // Latest snapshot and whether the render side has picked it up yet
    published: Option<Vec<f32>>,
    fresh: bool,
}

impl SimulationHost {
    /// Spawn the worker thread. It stays idle until [`start`](Self::start).
    pub fn spawn(params: PhysicsParams) -> Result<Self, HostError> {
        let (command_tx, command_rx) = bounded(CHANNEL_CAPACITY);
        let (reply_tx, reply_rx) = bounded(CHANNEL_CAPACITY);
        let handle = worker::spawn(params, command_rx, reply_tx)?;

        Ok(Self {
            commands: Some(command_tx),
            replies: reply_rx,
            worker: Some(handle),
            phase: HostPhase::Idle,
            particle_count: 0,
            step_in_flight: false,
            steps_requested: 0,
            steps_completed: 0,
            published: None,
            fresh: false,
        })
    }

    /// Move the initial buffers to the worker. The host keeps no copy.
    pub fn start(&mut self, positions: Vec<f32>, velocities: Vec<f32>) -> Result<(), HostError> {
        if self.phase != HostPhase::Idle {
            return Err(HostError::AlreadyStarted);
        }

        self.send(Command::Init {
            positions,
            velocities,
        })?;
        self.phase = HostPhase::Starting;
        Ok(())
    }

    pub fn start_particles(&mut self, particles: ParticleSet) -> Result<(), HostError> {
        let (positions, velocities) = particles.into_buffers();
        self.start(positions, velocities)
    }

    pub fn phase(&self) -> HostPhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == HostPhase::Ready
    }

    pub fn is_step_in_flight(&self) -> bool {
        self.step_in_flight
    }

    /// Zero until the worker is ready
    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    pub fn steps_requested(&self) -> u64 {
        self.steps_requested
    }

    pub fn steps_completed(&self) -> u64 {
        self.steps_completed
    }

    /// Block until the worker reports ready or `timeout` elapses.
    pub fn wait_ready(&mut self, timeout: Duration) -> Result<(), HostError> {
        let deadline = Instant::now() + timeout;

        while !self.is_ready() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.replies.recv_timeout(remaining) {
                Ok(reply) => self.handle_reply(reply)?,
                Err(RecvTimeoutError::Timeout) => return Err(HostError::ReadyTimeout),
                Err(RecvTimeoutError::Disconnected) => return Err(HostError::WorkerDisconnected),
            }
        }

        Ok(())
    }

    /// Drain every reply that has arrived without blocking.
    pub fn poll(&mut self) -> Result<(), HostError> {
        loop {
            match self.replies.try_recv() {
                Ok(reply) => self.handle_reply(reply)?,
                Err(TryRecvError::Empty) => return Ok(()),
                Err(TryRecvError::Disconnected) => return Err(HostError::WorkerDisconnected),
            }
        }
    }

    /// Ask the worker for one step. Returns `false` without sending anything
    /// when the worker is not ready yet or the previous step is still running.
    pub fn request_step(&mut self) -> Result<bool, HostError> {
        if !self.is_ready() || self.step_in_flight {
            return Ok(false);
        }

        self.send(Command::Step)?;
        self.step_in_flight = true;
        self.steps_requested += 1;
        Ok(true)
    }

    /// Per-frame driver: collect finished work, keep exactly one step queued
    /// once ready, and hand back positions the render side has not seen yet.
    pub fn frame(&mut self) -> Result<Option<&[f32]>, HostError> {
        self.poll()?;
        self.request_step()?;
        Ok(self.take_snapshot())
    }

    /// Block until the in-flight step completes, then return its positions.
    /// Returns `None` if nothing is in flight or `timeout` elapses first.
    pub fn wait_snapshot(&mut self, timeout: Duration) -> Result<Option<&[f32]>, HostError> {
        let deadline = Instant::now() + timeout;

        while self.step_in_flight {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.replies.recv_timeout(remaining) {
                Ok(reply) => self.handle_reply(reply)?,
                Err(RecvTimeoutError::Timeout) => return Ok(None),
                Err(RecvTimeoutError::Disconnected) => return Err(HostError::WorkerDisconnected),
            }
        }

        Ok(self.take_snapshot())
    }

    /// Newest positions if they have not been handed out before
    pub fn take_snapshot(&mut self) -> Option<&[f32]> {
        if !self.fresh {
            return None;
        }
        self.fresh = false;
        self.published.as_deref()
    }

    /// Newest positions regardless of whether they were already handed out
    pub fn latest(&self) -> Option<&[f32]> {
        self.published.as_deref()
    }

    /// Hang up on the worker and wait for it to exit. Any in-flight result is
    /// discarded.
    pub fn shutdown(mut self) {
        self.teardown();
    }

    fn send(&self, command: Command) -> Result<(), HostError> {
        let commands = self.commands.as_ref().ok_or(HostError::WorkerDisconnected)?;
        match commands.try_send(command) {
            Ok(()) => Ok(()),
            // Capacity covers init plus one step, so a full queue means the
            // worker stopped draining it
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => {
                Err(HostError::WorkerDisconnected)
            }
        }
    }

    fn handle_reply(&mut self, reply: Reply) -> Result<(), HostError> {
        match reply {
            Reply::Ready { particle_count } => {
                if self.phase == HostPhase::Ready {
                    log::warn!("Ignoring duplicate ready signal");
                    return Ok(());
                }
                self.phase = HostPhase::Ready;
                self.particle_count = particle_count;
                log::info!("Integrator ready with {} stars", particle_count);
            }
            Reply::Result { positions } => {
                if !self.step_in_flight {
                    log::warn!("Ignoring unrequested step result");
                    return Ok(());
                }
                self.step_in_flight = false;
                self.steps_completed += 1;
                self.published = Some(positions);
                self.fresh = true;
                log::trace!("Step {} published", self.steps_completed);
            }
            Reply::Failed(err) => {
                self.step_in_flight = false;
                return Err(HostError::Worker(err));
            }
        }
        Ok(())
    }

    fn teardown(&mut self) {
        drop(self.commands.take());
        // Keep the worker from blocking on a reply nobody will read
        while self.replies.try_recv().is_ok() {}

        if let Some(handle) = self.worker.take() {
            if handle.join().is_err() {
                log::error!("Integrator worker panicked");
            }
            log::debug!("Integrator worker stopped");
        }
    }
}

impl Drop for SimulationHost {
    fn drop(&mut self) {
        self.teardown();
    }
}
