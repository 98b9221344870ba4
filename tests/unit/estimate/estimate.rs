use super::*;
use crate::catalog::spec::{CommandSpec, DurationRule, Suspension};
use crate::compile::compiler::compile_fragment;
use crate::scene::model::Fragment;

fn compiled(catalog: &CommandCatalog, lines: &[&str]) -> CompiledFragment {
    compile_fragment(0, &Fragment::new(lines.iter().copied()), catalog)
}

#[test]
fn wait_place_wait_estimates_to_three() {
    let cat = CommandCatalog::builtin();
    let f = compiled(&cat, &["idle(2)", "setblock('minecraft:stone', 0, 0, 0)", "idle(1)"]);
    assert_eq!(estimate_fragment(&f), 3.0);
}

#[test]
fn non_suspending_timed_commands_add_nothing() {
    let cat = CommandCatalog::builtin();
    let f = compiled(
        &cat,
        &[
            "setblockfall('minecraft:sand', 0, 3, 0, 2)",
            "fillfall('minecraft:sand', 0, 0, 0, 4, 0, 4, 5)",
            "moveCamera(true, 1, 1, 1, 4)",
        ],
    );
    assert_eq!(estimate_fragment(&f), 0.0);
}

#[test]
fn composite_suspending_command_counts_once() {
    // A catalog where the fan-out fill is awaited: one declared duration, however many cells.
    let cat = CommandCatalog::builtin().with(
        CommandSpec::new("fillfall")
            .suspending(Suspension::Always)
            .timed(DurationRule::Arg {
                index: 7,
                plus: 0.0,
            }),
    );
    let f = compiled(&cat, &["fillfall('minecraft:sand', 0, 0, 0, 9, 0, 9, 2)"]);
    assert_eq!(estimate_fragment(&f), 2.0);
}

#[test]
fn bad_duration_arguments_default_to_zero() {
    let cat = CommandCatalog::builtin();
    let f = compiled(&cat, &["idle(later)", "idle()", "idle(-4)", "tip(0, 0, 0, 't', 'c', x)"]);
    // Only the callout's fixed fade-in/fade-out second survives.
    assert_eq!(estimate_fragment(&f), 1.0);
}

#[test]
fn estimate_lines_matches_compiled_estimate() {
    let cat = CommandCatalog::builtin();
    let lines = [
        "idle(1.5)",
        "cleanscene(false)",
        "not a call",
        "tiparea(0, 0, 0, 2, 2, 2, 'area', '#0f0', 2)",
    ];
    let f = compiled(&cat, &lines);
    assert_eq!(estimate_lines(&cat, lines), 5.5);
    assert_eq!(estimate_fragment(&f), 5.5);
}

#[test]
fn estimate_call_is_zero_for_unknown_commands() {
    let cat = CommandCatalog::builtin();
    let call = CommandCall::new("teleport", []);
    assert_eq!(estimate_call(&cat, &call), 0.0);
}

#[test]
fn duration_table_sums_and_offsets() {
    let cat = CommandCatalog::builtin();
    let fragments = vec![
        compiled(&cat, &["idle(1)"]),
        compiled(&cat, &["setblock('a', 0, 0, 0)"]),
        compiled(&cat, &["idle(2)", "idle(0.5)"]),
    ];
    let table = DurationTable::for_scene(7, &fragments);

    assert_eq!(table.scene(), 7);
    assert_eq!(table.len(), 3);
    assert_eq!(table.total_secs(), 3.5);
    assert_eq!(
        table.total_secs(),
        fragments.iter().map(estimate_fragment).sum::<f64>()
    );
    assert_eq!(table.offset_secs(0), 0.0);
    assert_eq!(table.offset_secs(2), 1.0);
    assert_eq!(table.get(3), None);
}

#[test]
fn overflowing_sums_saturate_to_max() {
    let cat = CommandCatalog::builtin();
    let lines = ["idle(1.7e308)", "idle(1.7e308)"];
    assert_eq!(estimate_lines(&cat, lines), f64::MAX);

    let f = compiled(&cat, &lines);
    assert_eq!(estimate_fragment(&f), f64::MAX);

    let table = DurationTable::for_scene(0, &[f.clone(), f]);
    assert_eq!(table.total_secs(), f64::MAX);
    assert_eq!(table.offset_secs(2), f64::MAX);
}

#[test]
fn numeric_prefix_with_unit_suffix_is_not_a_duration() {
    let cat = CommandCatalog::builtin();
    assert_eq!(estimate_lines(&cat, ["idle(2s)"]), 0.0);
    assert_eq!(estimate_lines(&cat, ["idle(2)"]), 2.0);
}
