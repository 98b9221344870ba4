use super::*;

#[test]
fn parses_the_script_document_shape() {
    let doc = ScriptDocument::from_json_str(
        r#"{
            "scenes": [
                {
                    "base": { "create": { "style": "5x5chessboard" } },
                    "fragment": [
                        ["idle(2)", "setblock('minecraft:stone', 0, 1, 0)"],
                        ["tip(0, 1, 0, 'hi', '#fff', 1)"]
                    ]
                },
                { "fragment": [["idle(1)"]] }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(doc.scene_count(), 2);
    let s0 = doc.scene(0).unwrap();
    assert!(s0.base.is_some());
    assert_eq!(s0.fragment_count(), 2);
    assert_eq!(s0.fragments[0].lines[1], "setblock('minecraft:stone', 0, 1, 0)");
    assert!(doc.scene(1).unwrap().base.is_none());
    assert!(doc.scene(2).is_none());
}

#[test]
fn serializes_fragments_as_plain_line_arrays() {
    let doc = ScriptDocument::new([Scene::new([Fragment::new(["idle(1)"])])]);
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "scenes": [ { "fragment": [["idle(1)"]] } ] })
    );
}

#[test]
fn validate_rejects_empty_documents_and_scenes() {
    let err = ScriptDocument::from_json_str(r#"{ "scenes": [] }"#).unwrap_err();
    assert!(err.to_string().contains("at least one scene"));

    let err = ScriptDocument::from_json_str(r#"{ "scenes": [ { "fragment": [] } ] }"#).unwrap_err();
    assert!(err.to_string().contains("scene 0"));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = ScriptDocument::from_json_str("{ scenes: ").unwrap_err();
    assert!(matches!(err, PonderError::Serde(_)));
}

#[test]
fn from_path_reports_missing_files() {
    let err = ScriptDocument::from_path("does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("does/not/exist.json"));
}
