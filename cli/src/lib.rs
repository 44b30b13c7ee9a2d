//! Whiteboard client library.
//!
//! Exposes the [`session`] coordinator so hosts (the bundled binary, or any
//! other embedding) can wire a transport to a full client session.

pub mod session;
