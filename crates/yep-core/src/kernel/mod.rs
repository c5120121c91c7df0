//! # YEP Core Kernel
//!
//! Runs inside the generated program. [`start_server`] assembles an
//! [`Application`] from the link-time registries and drives the bootstrap
//! pipeline until the server stops.
//!
//! - **[`bootstrap`]**: [`Application`] and [`start_server`].
//! - **[`component`]**: the collaborator contracts ([`component::Layer`],
//!   [`component::Server`]) and server registration.
//! - **[`shutdown`]**: the signal that ends the serving loop.
//! - **[`constants`]** and **[`error`]**: crate-wide names and the [`Error`] type.
pub mod bootstrap;
pub mod component;
pub mod constants;
pub mod error;
pub mod shutdown;

pub use bootstrap::{start_server, Application};
pub use component::{Layer, LayerContext, LayerKind, Server};
pub use error::{Error, Result};
pub use shutdown::{ShutdownSignal, ShutdownTrigger};
