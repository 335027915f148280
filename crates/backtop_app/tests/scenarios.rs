use backtop_app::{
    HeadlessRunConfig, HeadlessRuntime, ReportStatus, Scenario, WidgetConfigFile,
};

fn runtime_with(toml: &str) -> HeadlessRuntime {
    let file = WidgetConfigFile::from_toml_str(toml).unwrap();
    HeadlessRuntime::new(HeadlessRunConfig::default(), file.to_scroll_config()).unwrap()
}

#[test]
fn drag_then_click_is_swallowed_until_window_passes() {
    let mut rt = runtime_with("");
    let scenario = Scenario::from_json(
        r#"{"steps": [
            {"type": "scroll", "y": 1500},
            {"type": "pointer_down", "x": 1235, "y": 675},
            {"type": "pointer_move", "x": 635, "y": 375},
            {"type": "pointer_up", "x": 635, "y": 375},
            {"type": "assert_position", "x": 610, "y": 350},
            {"type": "click"},
            {"type": "assert_scroll", "y": 1500},
            {"type": "wait", "ms": 300},
            {"type": "click"},
            {"type": "settle"},
            {"type": "assert_scroll", "y": 0},
            {"type": "assert_visible", "visible": false}
        ]}"#,
    )
    .unwrap();

    let report = scenario.run(&mut rt).unwrap();
    assert_eq!(report.status, ReportStatus::Passed, "{report:?}");
    assert_eq!(report.clicks, 1);
    assert_eq!(report.steps_run, 12);
}

#[test]
fn configured_top_left_corner_and_threshold() {
    let mut rt = runtime_with(
        r#"
        [button]
        default_position = "top-left"
        size = "large"

        [scroll]
        show_after = 1000
        smooth = false
        behavior = "auto"
        "#,
    );
    let scenario = Scenario::from_json(
        r#"{"steps": [
            {"type": "assert_position", "x": 20, "y": 20},
            {"type": "scroll", "y": 1000},
            {"type": "assert_visible", "visible": false},
            {"type": "scroll", "y": 1001},
            {"type": "assert_visible", "visible": true},
            {"type": "click", "x": 50, "y": 50},
            {"type": "assert_scroll", "y": 0}
        ]}"#,
    )
    .unwrap();

    let report = scenario.run(&mut rt).unwrap();
    assert!(report.passed(), "{report:?}");
    assert_eq!(rt.frames(), 0);
    assert_eq!(rt.host().scroll_log().len(), 1);
}

#[test]
fn resize_moves_the_control_back_to_its_corner() {
    let mut rt = runtime_with("");
    let scenario = Scenario::from_json(
        r#"{"steps": [
            {"type": "scroll", "y": 800},
            {"type": "pointer_down", "x": 1235, "y": 675},
            {"type": "pointer_move", "x": 100, "y": 100},
            {"type": "pointer_up", "x": 100, "y": 100},
            {"type": "resize", "width": 800, "height": 600},
            {"type": "assert_position", "x": 730, "y": 530}
        ]}"#,
    )
    .unwrap();
    assert!(scenario.run(&mut rt).unwrap().passed());
}

#[test]
fn missing_scenario_file_is_an_error() {
    let err = Scenario::from_path(std::path::Path::new("does/not/exist.json"));
    assert!(err.is_err());
}
