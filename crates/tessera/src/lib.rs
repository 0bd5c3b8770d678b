//! # TESSERA
//!
//! Live tile worlds: generation, editing and the chunk cache wired
//! together.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐   publish   ┌──────────────────┐   draw   ┌──────────┐
//! │ GenerationWorker │────────────>│   WorldSession   │─────────>│ DrawSink │
//! │ (tessera_world)  │  (one-shot) │ grid + ChunkStore│          └──────────┘
//! └──────────────────┘             └────────┬─────────┘
//!                                           │ TileEvent
//!                                           v
//!                                    ┌─────────────┐
//!                                    │ subscribers │
//!                                    └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - `session`: Edits that keep frames and chunk geometry in step
//! - `events`: Tile change notifications
//! - `error`: Refused edits

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod events;
pub mod session;

pub use tessera_render as render;
pub use tessera_world as world;

pub use error::{EditError, EditResult};
pub use events::{EventBus, EventReceiver, EventSender, SendStatus, TileEvent};
pub use session::WorldSession;
