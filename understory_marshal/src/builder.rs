// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The style builder trait.

use crate::context::StyleContext;
use crate::definition::StyleDefinition;

/// Turns a raw input value into a [`StyleDefinition`].
///
/// Builders must be deterministic: the same input and context always produce
/// the same definition. Inputs a builder does not understand map to that
/// builder's own fallback rather than an error.
///
/// Plain functions and closures with the matching signature implement this
/// trait and are always cached.
///
/// # Example
///
/// ```rust
/// use understory_marshal::{StyleBuilder, StyleContext, StyleDefinition};
///
/// struct Order;
///
/// impl StyleBuilder for Order {
///     fn build_styles(&self, input: &str, _: &StyleContext) -> StyleDefinition {
///         let order = input.trim().parse::<i32>().unwrap_or(0);
///         StyleDefinition::builder().set("order", order.to_string()).build()
///     }
/// }
///
/// let styles = Order.build_styles("nope", &StyleContext::new());
/// assert_eq!(styles.get("order"), Some("0"));
/// ```
pub trait StyleBuilder {
    /// Computes the definition for `input` under `context`.
    fn build_styles(&self, input: &str, context: &StyleContext) -> StyleDefinition;

    /// Whether results may be memoized in the [`StyleCache`](crate::StyleCache).
    fn should_cache(&self) -> bool {
        true
    }
}

impl<F> StyleBuilder for F
where
    F: Fn(&str, &StyleContext) -> StyleDefinition,
{
    fn build_styles(&self, input: &str, context: &StyleContext) -> StyleDefinition {
        self(input, context)
    }
}
