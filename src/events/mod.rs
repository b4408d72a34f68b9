//! # Events Module
//!
//! Progress reporting decoupled from the pipeline.
//!
//! ## Design
//! The pipeline emits events through a channel; the CLI subscribes on a
//! separate thread and renders progress bars. The pipeline never waits on
//! the receiver.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Place(PlaceEvent::FileCopied { to, .. }) = event {
//!             println!("copied to {}", to.display());
//!         }
//!     }
//! });
//!
//! pipeline.run_with_events(&sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
