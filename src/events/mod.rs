//! # Events Module
//!
//! Progress reporting decoupled from presentation.
//!
//! The sorter emits events through a channel; the CLI listens on another
//! thread and drives its progress bar from them.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::File(FileEvent::Relocated { source, destination }) = event {
//!             println!("{} -> {}", source.display(), destination.display());
//!         }
//!     }
//! });
//!
//! sorter.run_with_events(&sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
