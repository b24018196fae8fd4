// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `layout-align` builder.

use understory_marshal::{StyleBuilder, StyleContext, StyleDefinition};

use crate::layout::FlexLayout;

/// Builds alignment styles from a `"<main-axis> [cross-axis]"` value.
///
/// The main axis maps to `justify-content`, the cross axis to `align-items`
/// and `align-content`. Unknown keywords fall back to `flex-start` and
/// `stretch`, and an empty value means `start stretch`.
///
/// The element's layout value, linked in under [`LAYOUT`](Self::LAYOUT),
/// decides `display` and `flex-direction`, and `display` stays `none` while
/// [`VISIBLE`](Self::VISIBLE) is `false`. An explicit `stretch` cross axis
/// also clamps the element along the cross axis so it does not outgrow its
/// container: `max-height` for rows, `max-width` for columns.
///
/// # Example
///
/// ```rust
/// use understory_flex::LayoutAlignStyleBuilder;
/// use understory_marshal::{StyleBuilder, StyleContext};
///
/// let cx = StyleContext::new().with(LayoutAlignStyleBuilder::LAYOUT, "column");
/// let styles = LayoutAlignStyleBuilder.build_styles("center stretch", &cx);
/// assert_eq!(styles.get("justify-content"), Some("center"));
/// assert_eq!(styles.get("align-items"), Some("stretch"));
/// assert_eq!(styles.get("flex-direction"), Some("column"));
/// assert_eq!(styles.get("max-width"), Some("100%"));
/// assert_eq!(styles.get("max-height"), None);
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct LayoutAlignStyleBuilder;

impl LayoutAlignStyleBuilder {
    /// Context parameter holding the element's layout value.
    pub const LAYOUT: &'static str = "layout";
    /// Context parameter holding the element's normalized visibility.
    pub const VISIBLE: &'static str = "visible";
}

fn justify_content(main: &str) -> &'static str {
    match main {
        "center" => "center",
        "space-around" => "space-around",
        "space-between" => "space-between",
        "space-evenly" => "space-evenly",
        "end" | "flex-end" => "flex-end",
        _ => "flex-start",
    }
}

/// `(align-items, align-content)` for a cross-axis keyword.
fn cross_alignment(cross: &str) -> (&'static str, &'static str) {
    match cross {
        "start" | "flex-start" => ("flex-start", "flex-start"),
        "center" => ("center", "center"),
        "end" | "flex-end" => ("flex-end", "flex-end"),
        "space-between" => ("stretch", "space-between"),
        "space-around" => ("stretch", "space-around"),
        "baseline" => ("baseline", "stretch"),
        _ => ("stretch", "stretch"),
    }
}

impl StyleBuilder for LayoutAlignStyleBuilder {
    fn build_styles(&self, input: &str, context: &StyleContext) -> StyleDefinition {
        let input = if input.trim().is_empty() {
            "start stretch"
        } else {
            input
        };
        let mut axes = input.split_whitespace();
        let main = axes.next().unwrap_or_default();
        let cross = axes.next().unwrap_or_default();
        let (align_items, align_content) = cross_alignment(cross);

        let layout = context
            .get(Self::LAYOUT)
            .map(FlexLayout::parse)
            .unwrap_or_default();
        let display = if context.get(Self::VISIBLE) == Some("false") {
            "none"
        } else {
            layout.display()
        };

        let mut styles = StyleDefinition::builder()
            .set("justify-content", justify_content(main))
            .set("align-items", align_items)
            .set("align-content", align_content)
            .set("display", display)
            .set("flex-direction", layout.direction)
            .set("box-sizing", "border-box");
        if cross == "stretch" {
            let clamp = if layout.is_horizontal() {
                "max-height"
            } else {
                "max-width"
            };
            styles = styles.set(clamp, "100%");
        }
        styles.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(input: &str) -> StyleDefinition {
        LayoutAlignStyleBuilder.build_styles(input, &StyleContext::new())
    }

    fn axes(styles: &StyleDefinition) -> [Option<&str>; 3] {
        [
            styles.get("justify-content"),
            styles.get("align-items"),
            styles.get("align-content"),
        ]
    }

    #[test]
    fn empty_value_is_start_stretch() {
        let styles = build("");
        assert_eq!(
            axes(&styles),
            [Some("flex-start"), Some("stretch"), Some("stretch")]
        );
        assert_eq!(styles.get("max-height"), Some("100%"));
        assert_eq!(styles, build("start stretch"));
    }

    #[test]
    fn main_axis_keywords() {
        let cases = [
            ("start", "flex-start"),
            ("flex-start", "flex-start"),
            ("center", "center"),
            ("space-around", "space-around"),
            ("space-between", "space-between"),
            ("space-evenly", "space-evenly"),
            ("end", "flex-end"),
            ("flex-end", "flex-end"),
            ("invalid", "flex-start"),
        ];
        for (main, expected) in cases {
            assert_eq!(build(main).get("justify-content"), Some(expected), "{main}");
        }
    }

    #[test]
    fn cross_axis_keywords() {
        let cases = [
            ("start", "flex-start", "flex-start"),
            ("center", "center", "center"),
            ("flex-end", "flex-end", "flex-end"),
            ("space-between", "stretch", "space-between"),
            ("space-around", "stretch", "space-around"),
            ("baseline", "baseline", "stretch"),
            ("invalid", "stretch", "stretch"),
        ];
        for (cross, items, content) in cases {
            let styles = LayoutAlignStyleBuilder.build_styles(
                &alloc::format!("start {cross}"),
                &StyleContext::new(),
            );
            assert_eq!(styles.get("align-items"), Some(items), "{cross}");
            assert_eq!(styles.get("align-content"), Some(content), "{cross}");
        }
    }

    #[test]
    fn only_an_explicit_stretch_clamps() {
        assert!(!build("start").contains("max-height"));
        assert!(!build("center center").contains("max-height"));
        assert!(!build("start invalid").contains("max-height"));
        assert_eq!(build("center stretch").get("max-height"), Some("100%"));
    }

    #[test]
    fn follows_the_linked_layout() {
        let cx = StyleContext::new().with(LayoutAlignStyleBuilder::LAYOUT, "column inline");
        let styles = LayoutAlignStyleBuilder.build_styles("end stretch", &cx);
        assert_eq!(styles.get("display"), Some("inline-flex"));
        assert_eq!(styles.get("flex-direction"), Some("column"));
        assert_eq!(styles.get("max-width"), Some("100%"));
        assert!(!styles.contains("max-height"));

        let styles = build("end");
        assert_eq!(styles.get("display"), Some("flex"));
        assert_eq!(styles.get("flex-direction"), Some("row"));
        assert_eq!(styles.get("box-sizing"), Some("border-box"));
    }

    #[test]
    fn hidden_elements_stay_hidden() {
        let cx = StyleContext::new()
            .with(LayoutAlignStyleBuilder::LAYOUT, "row inline")
            .with(LayoutAlignStyleBuilder::VISIBLE, "false");
        let styles = LayoutAlignStyleBuilder.build_styles("center", &cx);
        assert_eq!(styles.get("display"), Some("none"));
        assert_eq!(styles.get("justify-content"), Some("center"));

        let cx = StyleContext::new().with(LayoutAlignStyleBuilder::VISIBLE, "true");
        let styles = LayoutAlignStyleBuilder.build_styles("center", &cx);
        assert_eq!(styles.get("display"), Some("flex"));
    }
}
