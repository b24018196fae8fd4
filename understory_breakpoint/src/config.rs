// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Startup configuration of the breakpoint set.

use crate::breakpoint::BreakpointSpec;
use crate::defaults::{DEFAULT_BREAKPOINTS, ORIENTATION_BREAKPOINTS};
use crate::registry::{BreakpointError, BreakpointRegistry};

/// Describes which breakpoints exist for the lifetime of a process.
///
/// Custom breakpoints replace a built-in breakpoint with the same alias and
/// are otherwise appended. Two custom breakpoints sharing an alias are still
/// rejected with [`BreakpointError::DuplicateAlias`].
///
/// # Example
///
/// ```rust
/// use understory_breakpoint::{BreakpointSpec, LayoutConfig};
///
/// let config = LayoutConfig {
///     add_orientation_breakpoints: true,
///     breakpoints: vec![
///         BreakpointSpec::new("print", "print").priority(3000),
///         BreakpointSpec::new("md", "screen and (min-width: 1000px) and (max-width: 1399.98px)")
///             .priority(800),
///     ],
///     ..LayoutConfig::default()
/// };
/// let registry = config.build_registry().unwrap();
///
/// assert_eq!(registry.len(), 13 + 9 + 1);
/// assert_eq!(registry.ordered().next().map(|bp| bp.alias()), Some("print"));
/// assert!(registry.lookup("md").unwrap().media_query().contains("1000px"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    /// Leave out [`DEFAULT_BREAKPOINTS`].
    pub disable_default_breakpoints: bool,
    /// Include [`ORIENTATION_BREAKPOINTS`].
    pub add_orientation_breakpoints: bool,
    /// Application breakpoints.
    pub breakpoints: Vec<BreakpointSpec>,
}

impl LayoutConfig {
    /// The configured specs in registration order.
    #[must_use]
    pub fn specs(&self) -> Vec<BreakpointSpec> {
        let mut specs: Vec<BreakpointSpec> = Vec::new();
        if !self.disable_default_breakpoints {
            specs.extend_from_slice(DEFAULT_BREAKPOINTS);
        }
        if self.add_orientation_breakpoints {
            specs.extend_from_slice(ORIENTATION_BREAKPOINTS);
        }

        let builtin = specs.len();
        let mut replaced = vec![false; builtin];
        for custom in &self.breakpoints {
            let slot = specs[..builtin]
                .iter()
                .position(|spec| spec.alias == custom.alias)
                .filter(|&index| !replaced[index]);
            match slot {
                Some(index) => {
                    specs[index] = custom.clone();
                    replaced[index] = true;
                }
                None => specs.push(custom.clone()),
            }
        }
        specs
    }

    /// Builds the registry described by this configuration.
    ///
    /// # Errors
    ///
    /// Propagates the first [`BreakpointError`] raised while registering.
    pub fn build_registry(&self) -> Result<BreakpointRegistry, BreakpointError> {
        BreakpointRegistry::from_specs(&self.specs())
    }
}
