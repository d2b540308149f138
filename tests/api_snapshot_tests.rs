use curve_rs::api::{
    PLOT_SNAPSHOT_JSON_SCHEMA_V1, PlotEngine, PlotEngineConfig, PlotSnapshot,
};
use curve_rs::core::{RenderMode, Viewport};
use curve_rs::render::{Color, NullRenderer};

fn populated_engine() -> PlotEngine<NullRenderer> {
    let mut engine = PlotEngine::new(
        NullRenderer::default(),
        PlotEngineConfig::new(Viewport::new(900, 600)),
    )
    .expect("engine init");
    engine
        .select_by_name("trig/sin(x)", "trig/cos(x)")
        .expect("names");
    engine
        .set_foreground(Color::rgb(0.0, 0.0, 1.0))
        .expect("color");
    engine.record_history();
    engine
        .select_by_name("spiral/x = a·r·cos r", "spiral/y = a·r·sin r")
        .expect("names");
    engine.set_foreground(Color::RED).expect("color");
    engine.set_render_mode(RenderMode::Point);
    engine
}

#[test]
fn snapshot_captures_config_selection_and_history() {
    let engine = populated_engine();
    let snapshot = engine.snapshot();

    assert_eq!(snapshot.viewport, Viewport::new(900, 600));
    assert_eq!(snapshot.config.render_mode, RenderMode::Point);
    assert_eq!(snapshot.selection, engine.selection());
    assert_eq!(snapshot.x_name, "spiral/x = a·r·cos r");
    assert_eq!(snapshot.y_name, "spiral/y = a·r·sin r");
    assert_eq!(snapshot.history.len(), 1);
    assert_eq!(snapshot.history[0].x_name, "trig/sin(x)");
    assert_eq!(snapshot.history[0].color, Color::rgb(0.0, 0.0, 1.0));
}

#[test]
fn snapshot_json_contract_v1_roundtrip() {
    let engine = populated_engine();
    let json = engine
        .snapshot_json_contract_v1_pretty()
        .expect("contract json");

    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(
        value["schema_version"].as_u64(),
        Some(u64::from(PLOT_SNAPSHOT_JSON_SCHEMA_V1))
    );

    let restored = PlotSnapshot::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(restored, engine.snapshot());
}

#[test]
fn compat_parser_accepts_bare_snapshot() {
    let snapshot = populated_engine().snapshot();
    let json = snapshot.to_json_pretty().expect("bare json");
    let restored = PlotSnapshot::from_json_compat_str(&json).expect("parse bare");
    assert_eq!(restored, snapshot);
}

#[test]
fn compat_parser_rejects_unknown_schema_version() {
    let snapshot = populated_engine().snapshot();
    let json = snapshot
        .to_json_contract_v1_pretty()
        .expect("contract json")
        .replace("\"schema_version\": 1", "\"schema_version\": 99");

    let err = PlotSnapshot::from_json_compat_str(&json).expect_err("version must be checked");
    assert!(err.to_string().contains("unsupported snapshot schema version"));
    assert!(PlotSnapshot::from_json_compat_str("{ not json").is_err());
}
