// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in breakpoint catalogs.

use crate::breakpoint::BreakpointSpec;

/// The conventional width breakpoints.
///
/// Exact ranges (`xs` .. `xl`) rank above the open-ended `lt-*` ranges, which
/// rank above the `gt-*` ranges; the narrower a range, the higher its
/// priority.
pub static DEFAULT_BREAKPOINTS: &[BreakpointSpec] = &[
    BreakpointSpec::new("xs", "screen and (min-width: 0px) and (max-width: 599.98px)")
        .priority(1000),
    BreakpointSpec::new("sm", "screen and (min-width: 600px) and (max-width: 959.98px)")
        .priority(900),
    BreakpointSpec::new("md", "screen and (min-width: 960px) and (max-width: 1279.98px)")
        .priority(800),
    BreakpointSpec::new("lg", "screen and (min-width: 1280px) and (max-width: 1919.98px)")
        .priority(700),
    BreakpointSpec::new("xl", "screen and (min-width: 1920px) and (max-width: 4999.98px)")
        .priority(600),
    BreakpointSpec::new("lt-sm", "screen and (max-width: 599.98px)")
        .priority(950)
        .overlapping(true),
    BreakpointSpec::new("lt-md", "screen and (max-width: 959.98px)")
        .priority(850)
        .overlapping(true),
    BreakpointSpec::new("lt-lg", "screen and (max-width: 1279.98px)")
        .priority(750)
        .overlapping(true),
    BreakpointSpec::new("lt-xl", "screen and (max-width: 1919.98px)")
        .priority(650)
        .overlapping(true),
    BreakpointSpec::new("gt-xs", "screen and (min-width: 600px)")
        .priority(-950)
        .overlapping(true),
    BreakpointSpec::new("gt-sm", "screen and (min-width: 960px)")
        .priority(-850)
        .overlapping(true),
    BreakpointSpec::new("gt-md", "screen and (min-width: 1280px)")
        .priority(-750)
        .overlapping(true),
    BreakpointSpec::new("gt-lg", "screen and (min-width: 1920px)")
        .priority(-650)
        .overlapping(true),
];

const HANDSET_PORTRAIT: &str = "(orientation: portrait) and (max-width: 599.98px)";
const HANDSET_LANDSCAPE: &str = "(orientation: landscape) and (max-width: 959.98px)";
const TABLET_PORTRAIT: &str =
    "(orientation: portrait) and (min-width: 600px) and (max-width: 839.98px)";
const TABLET_LANDSCAPE: &str =
    "(orientation: landscape) and (min-width: 960px) and (max-width: 1279.98px)";
const WEB_PORTRAIT: &str = "(orientation: portrait) and (min-width: 840px)";
const WEB_LANDSCAPE: &str = "(orientation: landscape) and (min-width: 1280px)";

/// Device-class breakpoints keyed on orientation.
///
/// These rank above every [`DEFAULT_BREAKPOINTS`] entry.
pub static ORIENTATION_BREAKPOINTS: &[BreakpointSpec] = &[
    BreakpointSpec::new(
        "handset",
        "(orientation: portrait) and (max-width: 599.98px), \
         (orientation: landscape) and (max-width: 959.98px)",
    )
    .priority(2000),
    BreakpointSpec::new("handset.landscape", HANDSET_LANDSCAPE).priority(2000),
    BreakpointSpec::new("handset.portrait", HANDSET_PORTRAIT).priority(2000),
    BreakpointSpec::new(
        "tablet",
        "(orientation: portrait) and (min-width: 600px) and (max-width: 839.98px), \
         (orientation: landscape) and (min-width: 960px) and (max-width: 1279.98px)",
    )
    .priority(2100),
    BreakpointSpec::new("tablet.landscape", TABLET_LANDSCAPE).priority(2100),
    BreakpointSpec::new("tablet.portrait", TABLET_PORTRAIT).priority(2100),
    BreakpointSpec::new(
        "web",
        "(orientation: portrait) and (min-width: 840px), \
         (orientation: landscape) and (min-width: 1280px)",
    )
    .priority(2200)
    .overlapping(true),
    BreakpointSpec::new("web.landscape", WEB_LANDSCAPE)
        .priority(2200)
        .overlapping(true),
    BreakpointSpec::new("web.portrait", WEB_PORTRAIT)
        .priority(2200)
        .overlapping(true),
];
