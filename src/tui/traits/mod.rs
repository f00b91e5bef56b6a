//! Input contracts for TUI components
//!
//! Components that take keyboard input implement [`Interactive`]. The event
//! loop offers a key to the component that currently owns input and falls
//! back to global handling when it answers [`Handled::No`].

mod interactive;

pub use interactive::{Handled, Interactive};
