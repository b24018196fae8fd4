// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `flex-align-self` builder.

use alloc::borrow::Cow;
use alloc::string::String;

use understory_marshal::{StyleBuilder, StyleContext, StyleDefinition};

/// Builds `align-self` for a flex item.
///
/// `start` and `end` map to `flex-start` and `flex-end`, an empty value to
/// `stretch`. Any other value is passed through.
#[derive(Copy, Clone, Debug, Default)]
pub struct FlexAlignSelfStyleBuilder;

impl StyleBuilder for FlexAlignSelfStyleBuilder {
    fn build_styles(&self, input: &str, _: &StyleContext) -> StyleDefinition {
        let value: Cow<'static, str> = match input.trim() {
            "" => "stretch".into(),
            "start" => "flex-start".into(),
            "end" => "flex-end".into(),
            other => String::from(other).into(),
        };
        StyleDefinition::builder().set("align-self", value).build()
    }
}
