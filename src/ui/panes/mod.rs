//! TUI pane rendering modules
//!
//! Each pane module exports one stateless `render_*` function; the only state
//! a pane keeps between frames is the code pane's scroll position.
//!
//! - [`canvas`]: the visualized structure (bars or a rotated tree)
//! - [`code`]: display source with the current line highlighted
//! - [`info`]: algorithm, time, speed, counters and the latest message
//! - [`status`]: status bar with keybindings and playback state

pub mod canvas;
pub mod code;
pub mod info;
pub mod status;

pub use canvas::render_canvas_pane;
pub use code::{render_code_pane, CodeScrollState};
pub use info::{render_info_pane, InfoRenderData};
pub use status::{render_status_bar, Indicator};
