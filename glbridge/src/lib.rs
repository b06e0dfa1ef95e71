//! # glbridge
//!
//! This is the base, abstract crate for creating OpenGL contexts on top of native windows. Other
//! crates render through a function table (typically the one of the [gl] crate) but they don’t
//! give you a way to obtain a context that table can be filled from. Doing so is tightly related
//! to the platform you target: **Windows** goes through WGL, most **Unix** systems go through EGL,
//! and each of them has its own format negotiation and quirks. Several crates – `glbridge-*` –
//! exist to solve that problem. They all provide a different implementation for a simple need:
//! create a core-profile OpenGL context against a window you already own, bind it to a thread,
//! resolve entry points and present frames.
//!
//! # What’s included
//!
//! This crate exposes the types that all backends must use. Among them, you’ll find:
//!
//! - [`ContextBackend`]: the contract every platform implementation satisfies.
//! - [`ContextRequest`] and [`GlVersion`]: what you ask the driver for.
//! - [`FormatPolicy`]: the pixel format hint and the minimum format a backend accepts.
//! - [`ContextError`]: the error kinds every operation can fail with.
//! - [`Diagnostics`]: the sink human-readable messages are reported to.
//! - [`NativeWindowRef`]: a non-owning reference to the window you render into.
//! - [`proc_address`]: the procedure-resolver fallback chain and its sentinel set.
//! - [`library`]: runtime loading of the native GL libraries.
//! - [`loader`]: filling the [gl] function table once a context is current.
//!
//! [gl]: https://crates.io/crates/gl

#![deny(missing_docs)]

pub mod backend;
pub mod diagnostics;
pub mod error;
pub mod format;
pub mod library;
pub mod loader;
pub mod proc_address;
pub mod request;
pub mod window;

pub use crate::backend::{BackendState, ContextBackend};
pub use crate::diagnostics::{Diagnostics, LogDiagnostics, MemoryDiagnostics, Record};
pub use crate::error::ContextError;
pub use crate::format::{FormatPolicy, PixelFormat};
pub use crate::proc_address::ProcAddress;
pub use crate::request::{Api, ContextRequest, GlVersion};
pub use crate::window::NativeWindowRef;
