//! Domain entities for deskcast.
//!
//! This module contains the two shared slots at the heart of the system and
//! the command values that flow through them.  Nothing here touches the OS,
//! a socket, or a clock.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! The innermost layer of a Clean Architecture codebase holds the rules that
//! make the system what it is.  For deskcast those rules are small but strict:
//!
//! - there is at most one current frame, and readers always get the newest;
//! - there is at most one pending pointer move, and a newer one replaces it.
//!
//! Threads, HTTP handlers and X11 calls live in the outer layers and depend
//! on these types, never the other way around.

/// Latest-wins encoded frame slot.
pub mod frame;

/// Pointer queue, mouse buttons, click and key commands.
pub mod pointer;
