// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Flex: flexbox and grid style builders.
//!
//! This crate supplies the concrete [`StyleBuilder`](understory_marshal::StyleBuilder)s
//! for a small responsive layout vocabulary, and a binding table that maps
//! markup-style inputs such as `fxLayout.gt-sm="column"` onto an
//! [`understory_marshal::StyleMarshaller`].
//!
//! | Input | Key | Builder |
//! |-------|-----|---------|
//! | `fxLayout` | [`LAYOUT`] | [`LayoutStyleBuilder`] |
//! | `fxLayoutAlign` | [`LAYOUT_ALIGN`] | [`LayoutAlignStyleBuilder`] |
//! | `gdAuto` | [`GRID_AUTO`] | [`GridAutoStyleBuilder`] |
//! | `fxShow`, `fxHide` | [`SHOW_HIDE`] | [`ShowHideStyleBuilder`] |
//! | `fxFlexAlign` | [`FLEX_ALIGN_SELF`] | [`FlexAlignSelfStyleBuilder`] |
//!
//! Every builder is pure, so the marshaller caches its output.
//!
//! ```rust
//! use understory_breakpoint::LayoutConfig;
//! use understory_flex::{bind_input, register_builders};
//! use understory_marshal::{InlineStyles, StyleMarshaller};
//!
//! let mut marshaller =
//!     StyleMarshaller::from_config(&LayoutConfig::default(), InlineStyles::new()).unwrap();
//! register_builders(&mut marshaller);
//!
//! bind_input(&mut marshaller, "toolbar", "fxLayout", "row").unwrap();
//! bind_input(&mut marshaller, "toolbar", "fxLayout.xs", "column").unwrap();
//! bind_input(&mut marshaller, "toolbar", "fxLayoutAlign", "space-between center").unwrap();
//!
//! let styles = marshaller.applicator();
//! assert_eq!(styles.get("toolbar", "flex-direction"), Some("row"));
//! assert_eq!(styles.get("toolbar", "justify-content"), Some("space-between"));
//!
//! marshaller.activate("xs").unwrap();
//! assert_eq!(marshaller.applicator().get("toolbar", "flex-direction"), Some("column"));
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod align;
mod align_self;
mod grid;
mod input;
mod layout;
mod show_hide;

pub use align::LayoutAlignStyleBuilder;
pub use align_self::FlexAlignSelfStyleBuilder;
pub use grid::GridAutoStyleBuilder;
pub use input::{
    FLEX_ALIGN_SELF, FlexError, FlexInput, GRID_AUTO, LAYOUT, LAYOUT_ALIGN, SHOW_HIDE,
    bind_input, register_builders,
};
pub use layout::{FlexLayout, LAYOUT_VALUES, LayoutStyleBuilder};
pub use show_hide::ShowHideStyleBuilder;
