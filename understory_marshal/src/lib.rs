// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Marshal: responsive style resolution.
//!
//! This crate decides, for every element and style concern, which of several
//! breakpoint-scoped raw values currently applies, and keeps the element's
//! style in sync as breakpoints activate and deactivate.
//!
//! ## Core Concepts
//!
//! - [`StyleKey`] names a style concern such as `layout`.
//! - A [`StyleBuilder`] turns a raw value like `"row wrap"` into a
//!   [`StyleDefinition`], a shared sorted list of `property: value` pairs.
//!   Builders are pure, so their output is memoized in a [`StyleCache`]
//!   keyed by style key, raw value and [`StyleContext`].
//! - A [`StyleApplicator`] writes definitions onto elements and clears
//!   properties that no longer apply. [`InlineStyles`] is an in-memory
//!   implementation.
//! - [`StyleMarshaller`] ties these together with a
//!   [`MediaObserver`](understory_media::MediaObserver).
//!
//! ## Resolution
//!
//! Active breakpoints are searched from most to least specific and the first
//! one the binding has a value for wins. Without such a value the binding's
//! default, registered under the empty alias, wins. Bindings with neither are
//! left alone.
//!
//! ```rust
//! use understory_breakpoint::LayoutConfig;
//! use understory_marshal::{
//!     InlineStyles, StyleContext, StyleDefinition, StyleKey, StyleMarshaller,
//! };
//!
//! const GAP: StyleKey = StyleKey::new("gap");
//!
//! fn gap(input: &str, _: &StyleContext) -> StyleDefinition {
//!     StyleDefinition::builder().set("gap", input.to_owned()).build()
//! }
//!
//! let mut marshaller =
//!     StyleMarshaller::from_config(&LayoutConfig::default(), InlineStyles::new()).unwrap();
//! marshaller.register_builder(GAP, gap);
//! marshaller.register_binding("card", GAP, "", "8px").unwrap();
//! marshaller.register_binding("card", GAP, "gt-sm", "16px").unwrap();
//! marshaller.register_binding("card", GAP, "md", "24px").unwrap();
//!
//! marshaller.activate_only("md", true).unwrap();
//! assert_eq!(marshaller.applicator().get("card", "gap"), Some("24px"));
//!
//! marshaller.activate_only("lg", true).unwrap();
//! assert_eq!(marshaller.applicator().get("card", "gap"), Some("16px"));
//!
//! marshaller.activate_only("xs", true).unwrap();
//! assert_eq!(marshaller.applicator().get("card", "gap"), Some("8px"));
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod applicator;
mod builder;
mod cache;
mod context;
mod definition;
mod marshaller;

pub use applicator::{InlineStyles, StyleApplicator};
pub use builder::StyleBuilder;
pub use cache::{CacheStats, StyleCache};
pub use context::StyleContext;
pub use definition::{StyleDefinition, StyleDefinitionBuilder, StyleKey};
pub use marshaller::{ListenerId, MarshalError, StyleMarshaller};
