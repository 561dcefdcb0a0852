//! Authentication state for mutating operations.
//!
//! # Responsibility
//! - Track whether a user is signed in.
//! - Authorize store mutations and reject them while anonymous.
//!
//! # Invariants
//! - Only a successful credential check leaves the anonymous state.
//! - Logout always returns to the anonymous state.
//! - The credential check is a convenience gate, not a security boundary.

pub mod gate;
