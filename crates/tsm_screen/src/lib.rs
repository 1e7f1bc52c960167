//! The cell grid, cursor, scrollback, and editing primitives that make up
//! a terminal's screen model.

pub mod attr;
pub mod buffer;
pub mod cell;
pub mod screen;

pub use attr::{AttrFlags, Attributes, Color};
pub use buffer::{Buffer, BufferId, SavedCursor};
pub use cell::{Cell, Line};
pub use screen::{Screen, ScreenFlags};
