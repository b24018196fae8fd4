// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `grid-auto` builder.

use understory_marshal::{StyleBuilder, StyleContext, StyleDefinition};

/// Builds `grid-auto-flow` from a `"<row|column|dense> [dense]"` value.
///
/// Unknown directions become `row`. The context parameter
/// [`INLINE`](Self::INLINE) set to `"true"` selects `inline-grid`.
#[derive(Copy, Clone, Debug, Default)]
pub struct GridAutoStyleBuilder;

impl GridAutoStyleBuilder {
    /// Context parameter selecting `inline-grid`.
    pub const INLINE: &'static str = "inline";
}

impl StyleBuilder for GridAutoStyleBuilder {
    fn build_styles(&self, input: &str, context: &StyleContext) -> StyleDefinition {
        let mut tokens = input.split_whitespace();
        let direction = match tokens.next() {
            Some("column") => "column",
            Some("dense") => "dense",
            _ => "row",
        };
        let flow = match (direction, tokens.next()) {
            ("row", Some("dense")) => "row dense",
            ("column", Some("dense")) => "column dense",
            _ => direction,
        };
        let display = if context.get(Self::INLINE) == Some("true") {
            "inline-grid"
        } else {
            "grid"
        };
        StyleDefinition::builder()
            .set("display", display)
            .set("grid-auto-flow", flow)
            .build()
    }
}
