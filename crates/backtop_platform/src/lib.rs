//! backtop platform
//!
//! The [`HostSurface`] contract widgets are written against, plus
//! [`HeadlessHost`], a deterministic in-memory host used by tests and the
//! `backtop` binary.

pub mod error;
pub mod headless;
pub mod host;
pub mod selection;

pub use error::{PlatformError, Result};
pub use headless::{HeadlessHost, Listener, ScrollWrite};
pub use host::{Delivery, HostSurface, ListenerKind, ScrollBehavior};
pub use selection::{SelectionGuard, TextSelection};
