// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `layout` builder and the flex layout value grammar.

use understory_marshal::{StyleBuilder, StyleContext, StyleDefinition};

/// Accepted flex directions. The first is the fallback.
pub const LAYOUT_VALUES: [&str; 4] = ["row", "column", "row-reverse", "column-reverse"];

/// A parsed `"<direction> [inline] [wrap]"` layout value.
///
/// Parsing never fails: an unknown direction becomes `row` and any
/// unrecognized wrap keyword becomes `wrap`. `inline` may appear before or
/// after the wrap keyword.
///
/// # Example
///
/// ```rust
/// use understory_flex::FlexLayout;
///
/// let layout = FlexLayout::parse("column inline reverse");
/// assert_eq!(layout.direction, "column");
/// assert_eq!(layout.wrap, Some("wrap-reverse"));
/// assert!(layout.inline);
/// assert_eq!(layout.display(), "inline-flex");
///
/// assert_eq!(FlexLayout::parse("diagonal").direction, "row");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FlexLayout {
    /// One of [`LAYOUT_VALUES`].
    pub direction: &'static str,
    /// `wrap`, `wrap-reverse` or `nowrap`, if a wrap keyword was given.
    pub wrap: Option<&'static str>,
    /// Lay out as `inline-flex`.
    pub inline: bool,
}

impl Default for FlexLayout {
    fn default() -> Self {
        Self {
            direction: LAYOUT_VALUES[0],
            wrap: None,
            inline: false,
        }
    }
}

impl FlexLayout {
    /// Parses a layout value.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let mut tokens = value.split_whitespace();
        let direction = tokens
            .next()
            .and_then(|token| {
                LAYOUT_VALUES
                    .iter()
                    .copied()
                    .find(|known| known.eq_ignore_ascii_case(token))
            })
            .unwrap_or(LAYOUT_VALUES[0]);
        let mut layout = Self {
            direction,
            ..Self::default()
        };
        for token in tokens.take(2) {
            if token.eq_ignore_ascii_case("inline") {
                layout.inline = true;
            } else if layout.wrap.is_none() {
                layout.wrap = Some(wrap_value(token));
            }
        }
        layout
    }

    /// Returns `true` for `row` and `row-reverse`.
    #[must_use]
    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.direction.starts_with("row")
    }

    /// The `display` value this layout needs.
    #[must_use]
    #[inline]
    pub fn display(&self) -> &'static str {
        if self.inline { "inline-flex" } else { "flex" }
    }
}

fn wrap_value(token: &str) -> &'static str {
    const REVERSE: [&str; 3] = ["reverse", "wrap-reverse", "reverse-wrap"];
    const NO_WRAP: [&str; 3] = ["no", "none", "nowrap"];
    if REVERSE.iter().any(|k| k.eq_ignore_ascii_case(token)) {
        "wrap-reverse"
    } else if NO_WRAP.iter().any(|k| k.eq_ignore_ascii_case(token)) {
        "nowrap"
    } else {
        "wrap"
    }
}

/// Builds flex container styles from a layout value.
///
/// Emits `display`, `box-sizing`, `flex-direction` and, when a wrap keyword
/// is present, `flex-wrap`. An element stays `display: none` while its
/// context carries `display: none` or `visible: false`.
#[derive(Copy, Clone, Debug, Default)]
pub struct LayoutStyleBuilder;

impl LayoutStyleBuilder {
    /// Context parameter holding the element's own `display`.
    pub const DISPLAY: &'static str = "display";
    /// Context parameter holding the element's normalized visibility.
    pub const VISIBLE: &'static str = "visible";
}

impl StyleBuilder for LayoutStyleBuilder {
    fn build_styles(&self, input: &str, context: &StyleContext) -> StyleDefinition {
        let layout = FlexLayout::parse(input);
        let hidden = context.get(Self::DISPLAY) == Some("none")
            || context.get(Self::VISIBLE) == Some("false");
        let display = if hidden {
            "none"
        } else {
            layout.display()
        };
        let mut styles = StyleDefinition::builder()
            .set("display", display)
            .set("box-sizing", "border-box")
            .set("flex-direction", layout.direction);
        if let Some(wrap) = layout.wrap {
            styles = styles.set("flex-wrap", wrap);
        }
        styles.build()
    }
}
