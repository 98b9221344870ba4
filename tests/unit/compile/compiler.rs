use super::*;
use crate::scene::model::Scene;

fn frag(lines: &[&str]) -> Fragment {
    Fragment::new(lines.iter().copied())
}

#[test]
fn classifies_lines_in_order() {
    let cat = CommandCatalog::builtin();
    let f = compile_fragment(
        0,
        &frag(&[
            "idle(2)",
            "setblock('minecraft:stone', 0, 1, 0)",
            "moveCamera(true, 4, 4, 4, 2)",
            "moveCamera(false, 4, 4, 4, 2)",
        ]),
        &cat,
    );

    let suspends: Vec<bool> = f.instructions().iter().map(Instruction::suspends).collect();
    assert_eq!(suspends, vec![true, false, false, true]);
    assert_eq!(f.suspension_points(), 2);
    let lines: Vec<usize> = f.instructions().iter().map(Instruction::line).collect();
    assert_eq!(lines, vec![0, 1, 2, 3]);
}

#[test]
fn unknown_and_malformed_lines_become_unclassified_noops() {
    let cat = CommandCatalog::builtin();
    let f = compile_fragment(
        3,
        &frag(&["explode(1)", "console.log('x')", "  ", "// idle(9)", "idle(1)"]),
        &cat,
    );

    assert_eq!(f.index(), 3);
    assert_eq!(f.len(), 3);
    assert!(matches!(
        &f.instructions()[0],
        Instruction::Unclassified { line: 0, text } if text == "explode(1)"
    ));
    assert!(matches!(
        &f.instructions()[1],
        Instruction::Unclassified { line: 1, .. }
    ));
    assert_eq!(f.instructions()[2].line(), 4);
    assert_eq!(f.estimated_secs(), 1.0);
}

#[test]
fn command_names_inside_strings_are_not_classified() {
    let cat = CommandCatalog::builtin();
    let f = compile_fragment(0, &frag(&["setblock('idle(5)', 0, 0, 0)"]), &cat);
    assert_eq!(f.suspension_points(), 0);
    assert_eq!(f.estimated_secs(), 0.0);
}

#[test]
fn source_reparses_to_the_same_estimate() {
    let cat = CommandCatalog::builtin();
    let f = compile_fragment(
        0,
        &frag(&["idle(2)", "setblock('a', 0, 0, 0)", "tip(0, 0, 0, 'x, y', '#fff', 1)"]),
        &cat,
    );

    let src = f.source();
    assert!(src.starts_with("yield idle(2)\n"));
    assert!(src.contains("\nsetblock('a', 0, 0, 0)\n"));
    assert_eq!(crate::estimate::estimate_lines(&cat, src.lines()), f.estimated_secs());
    assert_eq!(f.estimated_secs(), 4.0);
}

#[test]
fn compile_scene_builds_duration_table() {
    let cat = CommandCatalog::builtin();
    let doc = ScriptDocument::new([
        Scene::new([frag(&["idle(1)"])]),
        Scene::new([frag(&["idle(2)", "idle(0.5)"]), frag(&["setblock('a', 0, 0, 0)"])]),
    ]);

    let compiled = compile_scene(&doc, 1, &cat).unwrap();
    assert_eq!(compiled.scene_index(), 1);
    assert_eq!(compiled.fragment_count(), 2);
    assert_eq!(compiled.durations().get(0), Some(2.5));
    assert_eq!(compiled.durations().get(1), Some(0.0));
    assert_eq!(compiled.total_secs(), 2.5);
}

#[test]
fn compile_scene_rejects_missing_scene() {
    let doc = ScriptDocument::new([Scene::new([frag(&["idle(1)"])])]);
    let err = compile_scene(&doc, 4, &CommandCatalog::builtin()).unwrap_err();
    assert!(matches!(
        err,
        PonderError::SceneOutOfRange { index: 4, count: 1 }
    ));
}
