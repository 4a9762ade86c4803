//! Fixed-capacity sliding-window statistics over `f64` samples.
//!
//! ```
//! use sundry_stats::SlidingWindow;
//!
//! let mut w = SlidingWindow::new(3);
//! for v in [1.0, 2.0, 3.0, 4.0] {
//!     w.push(v);
//! }
//! assert_eq!(w.len(), 3);
//! assert_eq!(w.mean(), 3.0);
//! assert_eq!(w.median(), 3.0);
//! ```

pub mod window;

pub use window::{SlidingWindow, WindowSummary};
