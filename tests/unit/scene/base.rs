use super::*;

#[test]
fn chessboard_expands_to_25_alternating_placements() {
    let calls = BaseLayout::chessboard(Vec3::new(0.0, 0.0, 0.0)).expand();
    assert_eq!(calls.len(), 25);
    assert!(calls.iter().all(|c| c.name == "setblock"));

    let first = &calls[0];
    assert_eq!(first.args[0].as_str(), "minecraft:snow");
    assert_eq!(first.args[1].as_f64(), Some(-2.0));
    assert_eq!(first.args[2].as_f64(), Some(0.0));
    assert_eq!(first.args[3].as_f64(), Some(-2.0));

    assert_eq!(calls[1].args[0].as_str(), "minecraft:clay");

    let snow = calls
        .iter()
        .filter(|c| c.args[0].as_str() == "minecraft:snow")
        .count();
    assert_eq!(snow, 13);
}

#[test]
fn chessboard_offset_shifts_every_cell() {
    let calls = BaseLayout::chessboard(Vec3::new(10.0, 3.0, -1.5)).expand();
    let last = calls.last().unwrap();
    assert_eq!(last.args[1].as_f64(), Some(12.0));
    assert_eq!(last.args[2].as_f64(), Some(3.0));
    assert_eq!(last.args[3].as_f64(), Some(0.5));
}

#[test]
fn missing_or_unknown_style_places_nothing() {
    assert!(BaseLayout::default().expand().is_empty());

    let no_style = BaseLayout {
        create: Some(BaseCreate::default()),
    };
    assert!(no_style.expand().is_empty());

    let unknown = BaseLayout {
        create: Some(BaseCreate {
            style: Some("spiral".to_owned()),
            offset: Vec3::default(),
        }),
    };
    assert!(unknown.expand().is_empty());
}

#[test]
fn deserializes_from_script_json() {
    let base: BaseLayout = serde_json::from_str(
        r#"{ "create": { "style": "5x5chessboard", "offset": { "x": 1, "y": 0, "z": 1 } } }"#,
    )
    .unwrap();
    assert_eq!(base, BaseLayout::chessboard(Vec3::new(1.0, 0.0, 1.0)));
}
