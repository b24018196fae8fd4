// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `show-hide` builder.

use alloc::string::String;

use understory_marshal::{StyleBuilder, StyleContext, StyleDefinition};

use crate::layout::FlexLayout;

/// Builds `display` from a visibility value.
///
/// `"false"` hides the element with `display: none`. Anything else shows
/// it: with the display its linked layout needs, else with the element's own
/// display from the [`DISPLAY`](Self::DISPLAY) parameter, else by leaving
/// `display` unset.
///
/// # Example
///
/// ```rust
/// use understory_flex::ShowHideStyleBuilder;
/// use understory_marshal::{StyleBuilder, StyleContext};
///
/// let hidden = ShowHideStyleBuilder.build_styles("false", &StyleContext::new());
/// assert_eq!(hidden.get("display"), Some("none"));
///
/// let cx = StyleContext::new().with(ShowHideStyleBuilder::LAYOUT, "row inline");
/// let shown = ShowHideStyleBuilder.build_styles("true", &cx);
/// assert_eq!(shown.get("display"), Some("inline-flex"));
///
/// assert!(ShowHideStyleBuilder.build_styles("true", &StyleContext::new()).is_empty());
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct ShowHideStyleBuilder;

impl ShowHideStyleBuilder {
    /// Context parameter holding the element's layout value.
    pub const LAYOUT: &'static str = "layout";
    /// Context parameter holding the element's own `display`.
    pub const DISPLAY: &'static str = "display";
}

/// Normalizes a visibility input to `"true"` or `"false"`.
///
/// An empty value counts as `true`, so a bare `fxShow` shows and a bare
/// `fxHide` hides. `invert` flips the result for hide inputs.
pub(crate) fn visibility(value: &str, invert: bool) -> &'static str {
    let shown = !value.trim().eq_ignore_ascii_case("false");
    if shown != invert { "true" } else { "false" }
}

impl StyleBuilder for ShowHideStyleBuilder {
    fn build_styles(&self, input: &str, context: &StyleContext) -> StyleDefinition {
        let styles = StyleDefinition::builder();
        if input == "false" {
            return styles.set("display", "none").build();
        }
        if let Some(layout) = context.get(Self::LAYOUT) {
            return styles
                .set("display", FlexLayout::parse(layout).display())
                .build();
        }
        match context.get(Self::DISPLAY) {
            Some(display) if display != "none" => styles.set("display", String::from(display)).build(),
            _ => styles.build(),
        }
    }
}
