//! Canvas state machine, history, and software raster for the whiteboard.
//!
//! This crate owns everything a client needs to turn relayed wire events into
//! pixels: a software RGBA surface standing in for the 2D canvas element, the
//! shape formulas, snapshot capture/restore, the per-client undo/redo history,
//! and the trace state machine that routes incremental draw instructions. The
//! host layer (the `cli` crate) is responsible only for wiring transport
//! events to the machine and emitting local intent back to the relay.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`machine`] | Trace state machine ([`machine::CanvasMachine`]) |
//! | [`history`] | Append-only snapshot stack with a movable cursor |
//! | [`raster`] | Software RGBA surface and line stroking |
//! | [`shape`] | Rectangle / circle / triangle / heart formulas |
//! | [`snapshot`] | PNG data-URL snapshot encode/decode |
//! | [`color`] | Color token resolution |
//! | [`tool`] | Tool mode variants |
//! | [`consts`] | Shared numeric constants (default widths, viewport) |

pub mod color;
pub mod consts;
pub mod history;
pub mod machine;
pub mod raster;
pub mod shape;
pub mod snapshot;
pub mod tool;
