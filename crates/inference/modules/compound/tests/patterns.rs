#![cfg(test)]
#![allow(
    clippy::unwrap_used,
    reason = "Fixtures are known-good detector output"
)]

use acr_model::{AcrTree, InferenceConfig, Kind, NodeId, PipelineContext};
use inference_compound::{match_tree, serialize};

/// A row holding a card-shaped container and a media-object-shaped row.
const CLASSIFIED: &str = r#"[
  { "id": 1, "type": "row", "contains": [
    { "id": 2, "type": "container", "contains": [
      { "id": 3, "type": "image" },
      { "id": 4, "type": "header" },
      { "id": 5, "type": "paragraph" }
    ] },
    { "id": 6, "type": "row", "contains": [
      { "id": 7, "type": "image" },
      { "id": 8, "type": "paragraph" }
    ] }
  ] }
]"#;

fn kind_of(tree: &AcrTree, raw: u64) -> Kind {
    tree.get(NodeId::new(raw)).unwrap().kind.clone()
}

#[test]
fn inner_patterns_match_before_outer_ones() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut tree = AcrTree::from_json_str(CLASSIFIED).unwrap();
    let config = InferenceConfig::default();
    let ctx = PipelineContext::new(&config, &tree);

    let matched = match_tree(&mut tree, &ctx);

    assert_eq!(matched.len(), 2);
    assert_eq!(kind_of(&tree, 2), Kind::Compound("card_image_text".to_owned()));
    assert_eq!(kind_of(&tree, 6), Kind::Compound("media_object".to_owned()));
    assert_eq!(kind_of(&tree, 1), Kind::Row);
    assert_eq!(
        serialize(&tree, NodeId::new(1)),
        "row { card_image_text, media_object }"
    );
}

#[test]
fn configured_patterns_can_match_outer_shapes() {
    let config = InferenceConfig::from_json_str(
        r#"{ "compoundPatterns": {
            "row { card_image_text, media_object }": "feature_strip",
            "container { image; header; paragraph }": "card_image_text",
            "row { image, paragraph }": "media_object"
        } }"#,
    )
    .unwrap();
    let mut tree = AcrTree::from_json_str(CLASSIFIED).unwrap();
    let ctx = PipelineContext::new(&config, &tree);

    match_tree(&mut tree, &ctx);

    assert_eq!(kind_of(&tree, 1), Kind::Compound("feature_strip".to_owned()));
    assert_eq!(tree.children(Some(NodeId::new(1))).len(), 2);
}

#[test]
fn unmatched_subtrees_are_untouched() {
    let mut tree = AcrTree::from_json_str(CLASSIFIED).unwrap();
    let config = InferenceConfig::from_json_str(r#"{ "compoundPatterns": {} }"#).unwrap();
    let ctx = PipelineContext::new(&config, &tree);

    assert!(match_tree(&mut tree, &ctx).is_empty());
    assert_eq!(kind_of(&tree, 2), Kind::Container);
}
