//! Flexbox box primitive for terminal UIs, with animated size transitions.
//!
//! A [`BoxInstance`] turns caller [`Styles`] into a single host element per
//! render. Two policies live here:
//!
//! - **Style resolution** ([`resolve`]): caller properties merged over the
//!   box defaults, with concrete per-axis overflow.
//! - **Size transitions** ([`SizeTransition`]): with `transition_size` on,
//!   the displayed width/height move one cell per [`TICK_INTERVAL`] toward
//!   the declared size.
//!
//! Layout itself is delegated to taffy through [`LayoutEngine`].
//!
//! ## Example
//!
//! ```rust
//! use crucible_box::*;
//! use std::rc::Rc;
//!
//! let scheduler = Rc::new(ManualScheduler::new());
//! let mut sidebar = BoxInstance::mount(scheduler.clone());
//!
//! let start = BoxProps::new(Styles::new().width(0)).transition_size(true);
//! sidebar.render(&start, [text("menu")], None);
//!
//! let grown = BoxProps::new(Styles::new().width(20)).transition_size(true);
//! sidebar.render(&grown, [text("menu")], None);
//! for id in scheduler.advance(TICK_INTERVAL * 5) {
//!     sidebar.handle_timer(id);
//! }
//! let node = sidebar.render(&grown, [text("menu")], None);
//! assert_eq!(node.as_element().unwrap().style.width, Some(Dimension::Cells(5)));
//! ```

pub mod component;
pub mod layout;
pub mod node;
#[cfg(any(test, feature = "test-utils"))]
pub mod proptest_strategies;
pub mod resolve;
pub mod scheduler;
pub mod style;
pub mod stylesheet;
pub mod transition;

pub use component::{BoxInstance, BoxProps, BOX_TAG};
pub use layout::{ComputedLayout, LayoutEngine, LayoutError, LayoutMap};
pub use node::{element, fragment, text, HostElement, Node, NodeHandle, NodeRef, TextNode};
pub use resolve::{resolve, resolve_displayed, BoxDefaults, ResolvedStyle};
pub use scheduler::{ManualScheduler, Scheduler, TimerId};
#[cfg(feature = "tokio-scheduler")]
pub use scheduler::{TimerFired, TokioScheduler};
pub use style::*;
pub use stylesheet::{StyleLoadError, StyleSheet};
pub use transition::{step_toward, SizeTransition, TargetSize, TransitionState, TICK_INTERVAL};
