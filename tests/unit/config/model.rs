use super::*;

#[test]
fn default_scene_is_valid() {
    SceneConfig::default().validate().unwrap();
}

#[test]
fn minimal_json_fills_defaults() {
    let scene = SceneConfig::from_json(r#"{"canvas": {"width": 320, "height": 200}}"#).unwrap();
    assert_eq!(scene.fps, 60);
    assert_eq!(scene.settings, EngineSettings::default());
    assert!(scene.wheels.is_empty());
}

#[test]
fn full_json_round_trips_fields() {
    let scene = SceneConfig::from_json(
        r##"{
            "canvas": {"width": 320, "height": 200},
            "fps": 30,
            "settings": {"maxWheels": 2, "base_bound": 100, "background": "#101010", "seed": 9},
            "wheels": [{"speed": 1, "randomOffset": true}, {"color": "#FF0000", "size": "10px"}]
        }"##,
    )
    .unwrap();
    assert_eq!(scene.fps, 30);
    assert_eq!(scene.settings.max_wheels, 2);
    assert_eq!(scene.settings.base_bound, 100);
    assert_eq!(scene.settings.background, Color::rgb(16, 16, 16));
    assert!(scene.wheels[0].random_offset);
    assert_eq!(scene.wheels[1].font_size, "10px");
}

#[test]
fn too_many_wheels_is_rejected() {
    let err = SceneConfig::from_json(
        r#"{"canvas": {"width": 8, "height": 8}, "settings": {"max_wheels": 1}, "wheels": [{}, {}]}"#,
    )
    .unwrap_err();
    assert!(matches!(err, PrimeWheelError::Validation(_)));
}

#[test]
fn bad_wheel_is_reported_with_its_index() {
    let err = SceneConfig::from_json(
        r#"{"canvas": {"width": 8, "height": 8}, "wheels": [{}, {"speed": 0}]}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("wheel 1"));
}

#[test]
fn zero_canvas_and_fps_are_rejected() {
    assert!(SceneConfig::from_json(r#"{"canvas": {"width": 0, "height": 8}}"#).is_err());
    assert!(SceneConfig::from_json(r#"{"canvas": {"width": 8, "height": 8}, "fps": 0}"#).is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = SceneConfig::from_json("{not json").unwrap_err();
    assert!(matches!(err, PrimeWheelError::Serde(_)));
}
