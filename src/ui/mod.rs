//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is the rendering collaborator of the playback engine:
//!
//! - **[`scene`]**: [`Scene`] implements [`Renderer`] and folds delivered
//!   batches into the contents and highlights on screen
//! - **[`metrics`]**: [`Metrics`] implements [`Observer`] and counts
//!   operations, comparisons, swaps and writes
//! - **[`app`]**: application state, keyboard event loop, frame cadence and
//!   the operand prompt
//! - **[`panes`]**: stateless render functions for each visible pane (canvas,
//!   code, info, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a
//! [`Session`] and call [`App::run`] to start the event loop.
//!
//! [`Renderer`]: crate::playback::Renderer
//! [`Observer`]: crate::playback::Observer
//! [`Session`]: crate::session::Session
//! [`App::run`]: app::App::run

pub mod app;
pub mod metrics;
pub mod panes;
pub mod scene;
pub mod theme;

pub use app::App;
pub use metrics::Metrics;
pub use scene::Scene;
