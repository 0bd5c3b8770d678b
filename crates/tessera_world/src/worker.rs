//! # Background Generation Worker
//!
//! Runs [`WorldGenerator::generate_with`] on a dedicated thread.
//!
//! ```text
//! ┌─────────────┐  progress (bounded)   ┌─────────────┐
//! │   Worker    │──────────────────────>│  UI thread  │
//! │  (generate) │  completion (cap 1)   │  (poll)     │
//! │             │──────────────────────>│             │
//! └─────────────┘                       └─────────────┘
//! ```
//!
//! The grid is owned by the worker until it is published through the
//! completion channel exactly once. There is no cancellation.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, RecvError, Sender, TryRecvError, TrySendError};

use crate::error::{WorldGenError, WorldGenResult};
use crate::generator::{GenerationObserver, WorldGenerator};
use crate::grid::TileGrid;
use crate::noise::WorldSeed;
use crate::settings::WorldSettings;

/// Progress events buffered before the worker starts dropping them.
pub const PROGRESS_CAPACITY: usize = 64;

/// One progress report from the worker.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationProgress {
    /// Name of the pass about to run, or `"Complete"`.
    pub pass: String,
    /// Fraction of passes already finished.
    pub fraction: f32,
}

/// Forwards observer callbacks into the progress channel.
struct ChannelObserver {
    sender: Sender<GenerationProgress>,
}

impl GenerationObserver for ChannelObserver {
    fn on_progress(&mut self, pass: &str, fraction: f32) {
        let event = GenerationProgress { pass: pass.to_string(), fraction };
        match self.sender.try_send(event) {
            Ok(()) | Err(TrySendError::Disconnected(_)) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!(pass, "progress channel full, dropping event");
            }
        }
    }
}

/// Handle to a world being generated in the background.
pub struct GenerationWorker {
    progress: Receiver<GenerationProgress>,
    completion: Receiver<WorldGenResult<TileGrid>>,
    handle: Option<JoinHandle<()>>,
}

impl GenerationWorker {
    /// Starts generating a world on a new thread.
    ///
    /// # Errors
    ///
    /// Returns `WorkerSpawn` if the thread cannot be created.
    pub fn spawn(
        generator: WorldGenerator,
        seed: WorldSeed,
        settings: WorldSettings,
    ) -> WorldGenResult<Self> {
        let (progress_tx, progress) = bounded(PROGRESS_CAPACITY);
        let (completion_tx, completion) = bounded(1);

        let handle = thread::Builder::new()
            .name("tessera-worldgen".into())
            .spawn(move || {
                let mut observer = ChannelObserver { sender: progress_tx };
                let result = generator.generate_with(seed, settings, &mut observer);
                if completion_tx.send(result).is_err() {
                    tracing::debug!("world finished after its handle was dropped");
                }
            })
            .map_err(|e| WorldGenError::WorkerSpawn(e.to_string()))?;

        tracing::info!(seed = seed.value(), "generation worker started");
        Ok(Self { progress, completion, handle: Some(handle) })
    }

    /// Drains every progress event received so far.
    #[must_use]
    pub fn poll_progress(&self) -> Vec<GenerationProgress> {
        self.progress.try_iter().collect()
    }

    /// Returns the finished world if generation is done.
    ///
    /// # Returns
    ///
    /// `None` while the worker is still running.
    ///
    /// # Errors
    ///
    /// Returns the generation error, `WorkerPanicked` if the thread panicked,
    /// or `WorkerDisconnected` if the result was already taken.
    pub fn try_finish(&mut self) -> Option<WorldGenResult<TileGrid>> {
        match self.completion.try_recv() {
            Ok(result) => {
                self.join();
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(self.join_failure())),
        }
    }

    /// Blocks until the world is finished.
    ///
    /// # Errors
    ///
    /// Same as [`Self::try_finish`].
    pub fn wait(mut self) -> WorldGenResult<TileGrid> {
        match self.completion.recv() {
            Ok(result) => {
                self.join();
                result
            }
            Err(RecvError) => Err(self.join_failure()),
        }
    }

    /// Returns true once the worker thread has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("generation worker panicked after publishing");
            }
        }
    }

    /// Classifies a closed completion channel.
    fn join_failure(&mut self) -> WorldGenError {
        match self.handle.take().map(JoinHandle::join) {
            Some(Err(_)) => {
                tracing::error!("generation worker panicked");
                WorldGenError::WorkerPanicked
            }
            _ => WorldGenError::WorkerDisconnected,
        }
    }
}
