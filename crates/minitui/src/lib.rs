// SPDX-License-Identifier: MIT
//
// minitui: a minimal immediate-mode terminal UI engine.
//
// The host rebuilds the whole screen every frame: it splits the screen
// with constraint-based layout, paints widgets into a fresh cell buffer,
// and hands the buffer to the runtime. The runtime diffs it against the
// previous frame row by row and writes only the rows that changed, as one
// batched write of ANSI escape sequences. Between frames the host blocks
// on a bounded input poll that decodes raw stdin bytes into keys.
//
// Direct terminal control: raw termios, ANSI/VT sequences, no external
// TUI framework underneath. Single-threaded, no background reader.

pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod diff;
pub mod error;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod output;
pub mod runtime;
pub mod style;
pub mod terminal;
pub mod text;
pub mod widgets;

pub use buffer::ScreenBuffer;
pub use cell::Cell;
pub use diff::RenderStats;
pub use error::{Error, Result};
pub use geometry::Rect;
pub use input::{Event, KeyCode, KeyEvent, Modifiers};
pub use layout::{Constraint, Direction};
pub use runtime::{Frame, Runtime, RuntimeConfig, run};
pub use style::{Color, Modifier, Style};
pub use terminal::Size;
pub use text::{TextLine, TextSpan};
pub use widgets::{Block, Borders, Clear, Line, List, Paragraph, Widget};
