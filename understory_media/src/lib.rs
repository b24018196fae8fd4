// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Media: breakpoint activation tracking.
//!
//! [`MediaObserver`] owns a [`BreakpointRegistry`](understory_breakpoint::BreakpointRegistry)
//! and the [`ActivationSet`] of breakpoints that currently match. It can be
//! driven directly, one alias at a time (useful in tests and for hosts that
//! run their own media-query listeners), or by handing it a
//! [`Viewport`](understory_breakpoint::Viewport) to evaluate every query.
//!
//! Every transition is delivered synchronously as a [`MediaChange`] before
//! the operation that caused it returns. Nothing is queued, so consumers
//! observe transitions strictly in order.
//!
//! ```rust
//! use understory_breakpoint::{LayoutConfig, Viewport};
//! use understory_media::MediaObserver;
//!
//! let mut media = MediaObserver::from_config(&LayoutConfig::default()).unwrap();
//! media.set_viewport(Viewport::new(375.0, 812.0));
//! assert!(media.is_active("xs"));
//! assert!(media.is_active("lt-md"));
//! assert!(!media.is_active("gt-xs"));
//!
//! media.activate_only("md", true).unwrap();
//! let active: Vec<_> = media.active().map(|bp| bp.alias()).collect();
//! assert_eq!(active, ["md", "lt-lg", "lt-xl", "gt-sm", "gt-xs"]);
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod activation;
mod observer;

pub use activation::ActivationSet;
pub use observer::{MediaChange, MediaError, MediaObserver, MediaState, SubscriptionId};
