// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Breakpoint: named viewport conditions for responsive styling.
//!
//! A breakpoint pairs an alias such as `md` or `gt-sm` with a media query and
//! a priority. Breakpoints are registered once at startup into a
//! [`BreakpointRegistry`], which hands out compact [`BreakpointId`]s and keeps
//! the set sorted from most to least specific.
//!
//! ## Priorities
//!
//! Higher priorities are more specific. In the default catalog narrower
//! ranges outrank wider ones, so `xs` beats `lt-sm`, which beats `sm`, and
//! every open-ended "greater than" range ranks below all of them. Equal
//! priorities keep registration order.
//!
//! ## Media queries
//!
//! Queries are parsed with [`cssparser`] into a [`MediaQueryList`] and
//! evaluated against a [`Viewport`]. Supported are the `all`, `screen` and
//! `print` media types, the `only` and `not` prefixes, and the `width`,
//! `height` (plus `min-`/`max-`) and `orientation` features.
//!
//! ```rust
//! use understory_breakpoint::{LayoutConfig, Viewport};
//!
//! let registry = LayoutConfig::default().build_registry().unwrap();
//! let laptop = Viewport::new(1366.0, 768.0);
//!
//! let active: Vec<_> = registry
//!     .ordered()
//!     .filter(|bp| bp.matches(&laptop))
//!     .map(|bp| bp.alias())
//!     .collect();
//! assert_eq!(active, ["lg", "lt-xl", "gt-md", "gt-sm", "gt-xs"]);
//! ```
//!
//! ## Features
//!
//! - `serde`: derives `Serialize`/`Deserialize` for [`LayoutConfig`] and
//!   [`BreakpointSpec`].
//!
//! ## `no_std` Support
//!
//! Unlike the other Understory responsive crates this one requires `std`,
//! because [`cssparser`] does.

mod breakpoint;
mod config;
mod defaults;
mod query;
mod registry;

pub use breakpoint::{Breakpoint, BreakpointId, BreakpointSpec};
pub use config::LayoutConfig;
pub use defaults::{DEFAULT_BREAKPOINTS, ORIENTATION_BREAKPOINTS};
pub use query::{
    MediaFeature, MediaQuery, MediaQueryError, MediaQueryList, MediaType, Orientation, Viewport,
};
pub use registry::{BreakpointError, BreakpointRegistry};
