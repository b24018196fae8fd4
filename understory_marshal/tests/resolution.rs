// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end resolution behavior across breakpoint transitions.

use std::cell::Cell;
use std::rc::Rc;

use understory_breakpoint::{LayoutConfig, Viewport};
use understory_marshal::{
    InlineStyles, StyleApplicator, StyleBuilder, StyleContext, StyleDefinition, StyleKey,
    StyleMarshaller,
};

const ALIGN: StyleKey = StyleKey::new("align");

/// Counts invocations; `start` adds a height clamp.
struct CountingAlign {
    calls: Rc<Cell<usize>>,
}

impl StyleBuilder for CountingAlign {
    fn build_styles(&self, input: &str, context: &StyleContext) -> StyleDefinition {
        self.calls.set(self.calls.get() + 1);
        let mut styles = StyleDefinition::builder().set("justify-content", input.to_owned());
        if input == "start" {
            styles = styles.set("max-height", "100%");
        }
        if let Some(display) = context.get("display") {
            styles = styles.set("display", display.to_owned());
        }
        styles.build()
    }
}

fn setup() -> (StyleMarshaller<u32>, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let mut marshaller =
        StyleMarshaller::from_config(&LayoutConfig::default(), InlineStyles::new()).unwrap();
    marshaller.register_builder(
        ALIGN,
        CountingAlign {
            calls: Rc::clone(&calls),
        },
    );
    (marshaller, calls)
}

#[test]
fn builder_output_is_deterministic() {
    let builder = CountingAlign {
        calls: Rc::default(),
    };
    let cx = StyleContext::new().with("display", "inline-flex");
    let first = builder.build_styles("start", &cx);
    for _ in 0..10 {
        assert_eq!(builder.build_styles("start", &cx), first);
    }
}

#[test]
fn fallback_walks_specificity_then_default() {
    let (mut m, _) = setup();
    m.register_binding(1, ALIGN, "", "default").unwrap();
    m.register_binding(1, ALIGN, "gt-sm", "wide").unwrap();
    m.register_binding(1, ALIGN, "md", "medium").unwrap();

    m.activate("md").unwrap();
    m.activate("gt-sm").unwrap();
    assert_eq!(m.resolved_input(1, ALIGN), Some("medium"));

    m.deactivate("md").unwrap();
    assert_eq!(m.resolved_input(1, ALIGN), Some("wide"));

    m.deactivate("gt-sm").unwrap();
    assert_eq!(m.resolved_input(1, ALIGN), Some("default"));
}

#[test]
fn leaving_a_clamped_state_removes_the_clamp() {
    let (mut m, _) = setup();
    m.register_binding(1, ALIGN, "", "start").unwrap();
    m.register_binding(1, ALIGN, "sm", "end").unwrap();
    assert_eq!(m.applicator().get(1, "max-height"), Some("100%"));

    m.activate("sm").unwrap();
    assert_eq!(m.applicator().get(1, "justify-content"), Some("end"));
    assert_eq!(m.applicator().get(1, "max-height"), None);
    assert!(m.applicator().styles(1).all(|(p, _)| p != "max-height"));

    m.deactivate("sm").unwrap();
    assert_eq!(m.applicator().get(1, "max-height"), Some("100%"));
}

#[test]
fn identical_bindings_share_one_build() {
    let (mut m, calls) = setup();
    m.set_context_value(1, ALIGN, "display", "flex");
    m.set_context_value(2, ALIGN, "display", "flex");
    m.register_binding(1, ALIGN, "", "center").unwrap();
    m.register_binding(2, ALIGN, "", "center").unwrap();

    assert_eq!(calls.get(), 1);
    let a = m.resolved(1, ALIGN).unwrap();
    let b = m.resolved(2, ALIGN).unwrap();
    assert!(a.ptr_eq(b));
    assert_eq!(m.cache().stats().hits, 1);

    // A different context is a different entry.
    m.set_context_value(3, ALIGN, "display", "inline-flex");
    m.register_binding(3, ALIGN, "", "center").unwrap();
    assert_eq!(calls.get(), 2);
    assert_eq!(m.applicator().get(3, "display"), Some("inline-flex"));
}

#[test]
fn reapplying_a_definition_changes_nothing() {
    let (mut m, _) = setup();
    m.register_binding(1, ALIGN, "", "start").unwrap();
    let before: Vec<(String, String)> = m
        .applicator()
        .styles(1)
        .map(|(p, v)| (p.to_owned(), v.to_owned()))
        .collect();
    let writes = m.applicator().writes();

    let resolved = m.resolved(1, ALIGN).unwrap().clone();
    m.applicator_mut().apply(1, &resolved);
    m.applicator_mut().apply(1, &resolved);

    let after: Vec<(String, String)> = m
        .applicator()
        .styles(1)
        .map(|(p, v)| (p.to_owned(), v.to_owned()))
        .collect();
    assert_eq!(before, after);
    assert_eq!(m.applicator().writes(), writes);
}

#[test]
fn unrelated_transitions_do_not_touch_bindings() {
    let (mut m, calls) = setup();
    m.register_binding(1, ALIGN, "", "center").unwrap();
    m.register_binding(1, ALIGN, "xl", "end").unwrap();
    let writes = m.applicator().writes();

    m.activate("sm").unwrap();
    m.activate("lt-md").unwrap();
    m.deactivate("sm").unwrap();
    assert_eq!(calls.get(), 1);
    assert_eq!(m.applicator().writes(), writes);
}

#[test]
fn viewport_changes_drive_resolution() {
    let (mut m, _) = setup();
    m.register_binding(1, ALIGN, "", "start").unwrap();
    m.register_binding(1, ALIGN, "lt-md", "center").unwrap();
    m.register_binding(1, ALIGN, "gt-md", "end").unwrap();

    m.set_viewport(Viewport::new(1600.0, 900.0));
    assert_eq!(m.resolved_input(1, ALIGN), Some("end"));

    m.set_viewport(Viewport::new(1100.0, 900.0));
    assert_eq!(m.resolved_input(1, ALIGN), Some("start"));

    m.set_viewport(Viewport::new(420.0, 900.0));
    assert_eq!(m.resolved_input(1, ALIGN), Some("center"));
    assert_eq!(m.applicator().get(1, "max-height"), None);
}

#[test]
fn overlapping_activation_prefers_the_covering_range() {
    let (mut m, _) = setup();
    m.register_binding(1, ALIGN, "", "start").unwrap();
    m.register_binding(1, ALIGN, "gt-xs", "end").unwrap();

    m.activate_only("lg", true).unwrap();
    assert_eq!(m.resolved_input(1, ALIGN), Some("end"));

    m.activate_only("lg", false).unwrap();
    assert_eq!(m.resolved_input(1, ALIGN), Some("start"));
}

#[test]
fn orientation_breakpoints_outrank_width_ranges() {
    let config = LayoutConfig {
        add_orientation_breakpoints: true,
        ..LayoutConfig::default()
    };
    let mut m: StyleMarshaller<u32> =
        StyleMarshaller::from_config(&config, InlineStyles::new()).unwrap();
    m.register_builder(ALIGN, |input: &str, _: &StyleContext| {
        StyleDefinition::builder()
            .set("justify-content", input.to_owned())
            .build()
    });
    m.register_binding(1, ALIGN, "xs", "narrow").unwrap();
    m.register_binding(1, ALIGN, "handset.portrait", "phone").unwrap();

    m.set_viewport(Viewport::new(390.0, 844.0));
    assert_eq!(m.resolved_input(1, ALIGN), Some("phone"));

    m.set_viewport(Viewport::new(844.0, 390.0));
    assert_eq!(m.resolved_input(1, ALIGN), None);
}
