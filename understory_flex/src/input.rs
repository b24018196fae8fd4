// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding `fxLayout.md`-style inputs onto a marshaller.

use alloc::string::String;
use core::fmt;
use core::hash::Hash;

use tracing::trace;
use understory_marshal::{MarshalError, StyleApplicator, StyleKey, StyleMarshaller};

use crate::align::LayoutAlignStyleBuilder;
use crate::align_self::FlexAlignSelfStyleBuilder;
use crate::grid::GridAutoStyleBuilder;
use crate::layout::LayoutStyleBuilder;
use crate::show_hide::{ShowHideStyleBuilder, visibility};

/// Flex container direction and wrapping.
pub const LAYOUT: StyleKey = StyleKey::new("layout");
/// Flex container alignment.
pub const LAYOUT_ALIGN: StyleKey = StyleKey::new("layout-align");
/// Grid auto-placement.
pub const GRID_AUTO: StyleKey = StyleKey::new("grid-auto");
/// Visibility.
pub const SHOW_HIDE: StyleKey = StyleKey::new("show-hide");
/// Flex item cross-axis self alignment.
pub const FLEX_ALIGN_SELF: StyleKey = StyleKey::new("flex-align-self");

/// Error returned by [`bind_input`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FlexError {
    /// The input name is not one of the recognized layout inputs.
    #[error("`{0}` is not a recognized layout input")]
    UnknownInput(String),
    /// The marshaller rejected the binding.
    #[error(transparent)]
    Marshal(#[from] MarshalError),
}

/// A recognized layout input, without its breakpoint suffix.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FlexInput {
    /// `fxLayout`
    Layout,
    /// `fxLayoutAlign`
    LayoutAlign,
    /// `gdAuto`
    GridAuto,
    /// `fxShow`
    Show,
    /// `fxHide`, the inverse of `fxShow`.
    Hide,
    /// `fxFlexAlign`
    FlexAlign,
}

impl FlexInput {
    /// Every input, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Layout,
        Self::LayoutAlign,
        Self::GridAuto,
        Self::Show,
        Self::Hide,
        Self::FlexAlign,
    ];

    /// The input's name as written in markup.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Layout => "fxLayout",
            Self::LayoutAlign => "fxLayoutAlign",
            Self::GridAuto => "gdAuto",
            Self::Show => "fxShow",
            Self::Hide => "fxHide",
            Self::FlexAlign => "fxFlexAlign",
        }
    }

    /// The style key the input binds.
    #[must_use]
    pub const fn key(self) -> StyleKey {
        match self {
            Self::Layout => LAYOUT,
            Self::LayoutAlign => LAYOUT_ALIGN,
            Self::GridAuto => GRID_AUTO,
            Self::Show | Self::Hide => SHOW_HIDE,
            Self::FlexAlign => FLEX_ALIGN_SELF,
        }
    }

    /// Splits `fxLayout.gt-sm` into the input and its breakpoint alias.
    ///
    /// The alias is empty for an unsuffixed name like `fxLayout`. Aliases may
    /// themselves contain dots, as in `fxShow.handset.portrait`.
    ///
    /// ```rust
    /// use understory_flex::FlexInput;
    ///
    /// assert_eq!(FlexInput::parse("fxLayout"), Some((FlexInput::Layout, "")));
    /// assert_eq!(
    ///     FlexInput::parse("fxHide.handset.portrait"),
    ///     Some((FlexInput::Hide, "handset.portrait"))
    /// );
    /// assert_eq!(FlexInput::parse("fxLayoutGap.md"), None);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Option<(Self, &str)> {
        let (base, alias) = name.split_once('.').unwrap_or((name, ""));
        let input = Self::ALL.into_iter().find(|input| input.name() == base)?;
        Some((input, alias))
    }
}

impl fmt::Display for FlexInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Installs the builder for every key this crate defines.
pub fn register_builders<K, A>(marshaller: &mut StyleMarshaller<K, A>)
where
    K: Copy + Eq + Hash + fmt::Debug,
    A: StyleApplicator<K>,
{
    marshaller.register_builder(LAYOUT, LayoutStyleBuilder);
    marshaller.register_builder(LAYOUT_ALIGN, LayoutAlignStyleBuilder);
    marshaller.register_builder(GRID_AUTO, GridAutoStyleBuilder);
    marshaller.register_builder(SHOW_HIDE, ShowHideStyleBuilder);
    marshaller.register_builder(FLEX_ALIGN_SELF, FlexAlignSelfStyleBuilder);
}

/// Binds one markup input such as `fxLayoutAlign.md="center center"`.
///
/// Visibility values are normalized to `"true"` or `"false"`, with `fxHide`
/// inverted, so `fxShow` and `fxHide` share the `show-hide` binding.
/// Alignment and visibility inputs are linked to the element's `layout`
/// binding so they follow its direction and display, and both `layout` and
/// `layout-align` keep a hidden element hidden.
///
/// # Errors
///
/// Returns [`FlexError::UnknownInput`] for an unrecognized input name and
/// [`FlexError::Marshal`] for an unregistered breakpoint suffix.
pub fn bind_input<K, A>(
    marshaller: &mut StyleMarshaller<K, A>,
    element: K,
    name: &str,
    value: &str,
) -> Result<(), FlexError>
where
    K: Copy + Eq + Hash + fmt::Debug,
    A: StyleApplicator<K>,
{
    let (input, alias) =
        FlexInput::parse(name).ok_or_else(|| FlexError::UnknownInput(name.into()))?;
    let value = match input {
        FlexInput::Show => visibility(value, false),
        FlexInput::Hide => visibility(value, true),
        _ => value,
    };
    trace!(element = ?element, input = %input, alias, value, "binding layout input");
    marshaller.register_binding(element, input.key(), alias, value)?;
    match input {
        FlexInput::LayoutAlign => {
            marshaller.link(element, LAYOUT, LAYOUT_ALIGN, LayoutAlignStyleBuilder::LAYOUT);
            marshaller.link(element, SHOW_HIDE, LAYOUT_ALIGN, LayoutAlignStyleBuilder::VISIBLE);
        }
        FlexInput::Show | FlexInput::Hide => {
            marshaller.link(element, LAYOUT, SHOW_HIDE, ShowHideStyleBuilder::LAYOUT);
            marshaller.link(element, SHOW_HIDE, LAYOUT, LayoutStyleBuilder::VISIBLE);
            marshaller.link(element, SHOW_HIDE, LAYOUT_ALIGN, LayoutAlignStyleBuilder::VISIBLE);
        }
        FlexInput::Layout | FlexInput::GridAuto | FlexInput::FlexAlign => {}
    }
    Ok(())
}
