use keyflow_animation_core::{
    animation_to_json, parse_animation_json, AnimationAsset, AnimationError, AnimationStructure,
    PlaybackStyle, StructureVariant,
};
use keyflow_test_fixtures as fixtures;

fn approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn load(name: &str) -> AnimationAsset {
    let json = fixtures::json(name).expect("fixture json");
    parse_animation_json(&json).expect("parse stored animation")
}

const TX: &[&str] = &["components", "Transform", "translation", "x"];
const TY: &[&str] = &["components", "Transform", "translation", "y"];

#[test]
fn bounce_loads_nested_sequences() {
    let asset = load("bounce");
    assert_eq!(asset.name(), "bounce");
    assert_eq!(asset.id_resource(), "Animation|bounce-0001");
    assert_eq!(asset.fps(), 10.0);
    assert_eq!(asset.total_time(), 1000.0);
    assert_eq!(asset.label("apex"), Some(500.0));
    assert_eq!(asset.event("land"), Some(900.0));
    assert_eq!(asset.structure().sequence_count(), 2);

    let y = asset.structure().sequence_at(TY).unwrap();
    assert_eq!(y.len(), 3);
    assert_eq!(y.get_key(0).unwrap().slope_out, 0.04);
    assert_eq!(y.get_key(2).unwrap().slope_in, -0.04);
    assert_eq!(y.evaluate(500.0), 10.0);

    let x = asset.structure().sequence_at(TX).unwrap();
    // Slopes matching the chord make the segment a straight line.
    approx(x.evaluate(250.0), 0.5, 1e-9);
    approx(x.evaluate(750.0), 1.5, 1e-9);
}

#[test]
fn bounce_round_trips_through_json() {
    let asset = load("bounce");
    let json = animation_to_json(&asset).unwrap();
    let back = AnimationAsset::from_json(&json).unwrap();
    assert_eq!(back.name(), asset.name());
    assert_eq!(back.id_resource(), asset.id_resource());
    assert_eq!(back.fps(), asset.fps());
    assert_eq!(back.sps(), asset.sps());
    assert_eq!(back.labels(), asset.labels());
    assert_eq!(back.events(), asset.events());
    assert_eq!(back.structure(), asset.structure());
    assert_eq!(back.total_time(), 1000.0);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        value["animationStructure"]["components"]["Transform"]["translation"]["y"]
            ["animationSequence"],
        serde_json::json!(true)
    );
    assert!(value["animationStructure"]["components"]["Transform"]["translation"]["y"]["keys"]
        [1]["constant"]
        .is_boolean());
}

#[test]
fn blink_constant_keys_hold() {
    let mut asset = load("blink");
    assert_eq!(asset.fps(), 30.0);
    assert_eq!(asset.total_time(), 600.0);
    let eyelid = asset.structure().sequence_at(&["eyelid"]).unwrap().clone();
    assert!(eyelid.keys().iter().all(|k| k.is_step));
    assert_eq!(eyelid.evaluate(199.0), 1.0);
    assert_eq!(eyelid.evaluate(200.0), 0.0);
    assert_eq!(eyelid.evaluate(399.9), 0.0);
    assert_eq!(eyelid.evaluate(450.0), 1.0);

    let fired = asset.get_events_to_fire(150.0, 450.0, PlaybackStyle::Continuous, 1.0);
    assert_eq!(fired, vec!["closed", "opened"]);
}

#[test]
fn ramp_fills_defaults_and_keeps_empty_sequences() {
    let mut asset = load("ramp");
    assert_eq!(asset.fps(), 60.0);
    assert_eq!(asset.sps(), 10.0);
    assert!(asset.id_resource().starts_with("Animation|"));
    assert!(asset.labels().is_empty());
    assert_eq!(asset.total_time(), 1000.0);

    let empty = asset.structure().sequence_at(&["empty"]).unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.evaluate(10.0), 0.0);
    assert_eq!(empty.try_evaluate(10.0), None);

    let m = asset.evaluate(500.0, 1.0, PlaybackStyle::Continuous);
    assert_eq!(m.value(&["empty"]), Some(0.0));
    approx(m.value(&["opacity"]).unwrap(), 0.5, 1e-9);

    // Rastering the empty sequence leaves it empty.
    let rastered = asset.get_structure(StructureVariant::Rastered);
    assert!(rastered.sequence_at(&["empty"]).unwrap().is_empty());
    assert_eq!(rastered.sequence_at(&["opacity"]).unwrap().len(), 60);
}

#[test]
fn unmarked_leaves_become_empty_nodes() {
    let mut asset = load("unmarked");
    assert_eq!(asset.fps(), 24.0);
    assert_eq!(asset.total_time(), 0.0);
    assert_eq!(asset.structure().sequence_count(), 0);
    assert_eq!(
        asset.structure().child("scale"),
        Some(&AnimationStructure::node())
    );
    assert!(asset.structure().child("position").unwrap().child("keys").is_some());

    let m = asset.evaluate(50.0, 1.0, PlaybackStyle::Continuous);
    assert_eq!(m.leaf_count(), 0);
}

#[test]
fn every_fixture_parses() {
    for name in fixtures::names() {
        let asset = load(name);
        assert_eq!(asset.name(), name);
    }
}

#[test]
fn bad_input_is_reported() {
    let err = parse_animation_json("{ not json").unwrap_err();
    assert_eq!(err.category(), "serialization");

    let err = parse_animation_json(r#"{ "name": "x", "fps": 0, "animationStructure": {} }"#)
        .unwrap_err();
    assert!(matches!(err, AnimationError::InvalidField { ref field, .. } if field == "fps"));

    let err = parse_animation_json(r#"{ "fps": 30, "animationStructure": {} }"#).unwrap_err();
    assert!(matches!(err, AnimationError::Serialization { .. }));
}
