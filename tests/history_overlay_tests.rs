use curve_rs::api::{PlotEngine, PlotEngineConfig, SelectionState};
use curve_rs::core::Viewport;
use curve_rs::render::{Color, LayerSource, NullRenderer};
use proptest::prelude::*;

const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
const GREEN: Color = Color::rgb(0.0, 0.8, 0.0);

fn engine() -> PlotEngine<NullRenderer> {
    PlotEngine::new(
        NullRenderer::default(),
        PlotEngineConfig::new(Viewport::new(800, 800)),
    )
    .expect("engine init")
}

fn record(engine: &mut PlotEngine<NullRenderer>, x_name: &str, y_name: &str, color: Color) {
    engine.select_by_name(x_name, y_name).expect("known names");
    engine.set_foreground(color).expect("valid color");
    engine.record_history();
}

#[test]
fn render_pass_leaves_live_selection_untouched() {
    let mut engine = engine();
    record(&mut engine, "trig/sin(x)", "trig/cos(x)", BLUE);
    record(&mut engine, "circle/x = a·sin r", "circle/y = a·cos r", GREEN);

    engine.select_by_name("identity/t", "power/x^2").expect("names");
    engine.set_foreground(Color::RED).expect("color");
    let before = engine.selection();
    let config_before = engine.config();

    engine.render().expect("render");
    engine.render().expect("second render");

    assert_eq!(engine.selection(), before);
    assert_eq!(engine.config(), config_before);
    assert_eq!(engine.renderer().frames_rendered, 2);
}

#[test]
fn projected_history_entry_keeps_its_source_and_matches_the_frame() {
    let mut engine = engine();
    record(&mut engine, "trig/sin(x)", "trig/cos(x)", BLUE);
    engine.select_by_name("identity/t", "identity/t").expect("names");
    engine.set_foreground(Color::RED).expect("color");

    let entry = engine.history()[0].selection();
    let layer = engine
        .project_curve(LayerSource::History(0), entry)
        .expect("projection");
    let frame = engine.build_render_frame().expect("frame");

    assert_eq!(layer.source, LayerSource::History(0));
    assert_eq!(layer.color, BLUE);
    assert_eq!(layer, frame.layers[0]);
}

#[test]
fn frame_has_one_layer_per_history_entry_plus_live() {
    let mut engine = engine();
    record(&mut engine, "trig/sin(x)", "trig/cos(x)", BLUE);
    record(&mut engine, "identity/t", "power/x^3", GREEN);
    engine.select_by_name("identity/t", "identity/t").expect("names");
    engine.set_foreground(Color::RED).expect("color");

    let frame = engine.build_render_frame().expect("frame");
    let sources: Vec<_> = frame.layers.iter().map(|layer| layer.source).collect();
    assert_eq!(
        sources,
        vec![
            LayerSource::History(0),
            LayerSource::History(1),
            LayerSource::Live
        ]
    );

    let history = engine.history();
    for (layer, entry) in frame.layers.iter().zip(history) {
        assert_eq!(layer.index_x, entry.index_x());
        assert_eq!(layer.index_y, entry.index_y());
        assert_eq!(layer.color, entry.color());
        assert!(layer.lines.iter().all(|line| line.color == entry.color()));
    }

    let live = frame.live_layer().expect("live layer");
    assert_eq!(live.color, Color::RED);
    assert_eq!(live.index_x, 0);
    assert_eq!(live.index_y, 0);
    assert!(std::ptr::eq(live, frame.layers.last().expect("layers")));
}

#[test]
fn recorded_entries_do_not_track_live_edits() {
    let mut engine = engine();
    record(&mut engine, "trig/sin(x)", "trig/cos(x)", BLUE);
    let recorded = engine.history()[0];

    engine.set_foreground(GREEN).expect("color");
    engine.set_selection_indices(5, 6);

    assert_eq!(engine.history()[0], recorded);
    assert_eq!(engine.history()[0].color(), BLUE);
}

#[test]
fn history_labels_resolve_names_through_clamped_lookup() {
    let mut engine = engine();
    record(&mut engine, "trig/tan(x)", "log/ln(x)", BLUE);
    engine
        .set_selection(SelectionState::new(-4, 10_000, GREEN))
        .expect("selection");
    engine.record_history();

    let labels = engine.history_labels();
    assert_eq!(labels.len(), 2);
    assert_eq!(labels[0].index, 0);
    assert_eq!(labels[0].x_name, "trig/tan(x)");
    assert_eq!(labels[0].y_name, "log/ln(x)");
    assert_eq!(labels[0].color, BLUE);
    assert_eq!(labels[1].x_name, "identity/t");
    assert_eq!(labels[1].y_name, "identity/t");
    assert_eq!(labels[1].color, GREEN);
}

#[test]
fn removal_shifts_later_entries_down() {
    let mut engine = engine();
    record(&mut engine, "trig/sin(x)", "trig/cos(x)", BLUE);
    record(&mut engine, "identity/t", "power/x^2", GREEN);
    record(&mut engine, "identity/t", "power/x^3", Color::RED);

    let removed = engine.remove_history(1).expect("in bounds");
    assert_eq!(removed.color(), GREEN);
    assert_eq!(engine.history().len(), 2);
    assert_eq!(engine.history()[1].color(), Color::RED);

    engine.clear_history();
    assert!(engine.history().is_empty());
    let frame = engine.build_render_frame().expect("frame");
    assert_eq!(frame.layers.len(), 1);
}

proptest! {
    #[test]
    fn out_of_bounds_removal_is_a_no_op(entries in 0usize..6, extra in 0usize..64) {
        let mut engine = engine();
        for i in 0..entries {
            engine.set_selection_indices(i as i32, i as i32 + 1);
            engine.record_history();
        }
        let before = engine.history().to_vec();

        prop_assert!(engine.remove_history(entries + extra).is_none());
        prop_assert_eq!(engine.history(), before.as_slice());
    }

    #[test]
    fn replay_is_side_effect_neutral_for_any_selection(
        history in prop::collection::vec((-5i32..200, -5i32..200), 0..5),
        live_x in -5i32..200,
        live_y in -5i32..200,
    ) {
        let mut engine = engine();
        engine.set_domain(10, 5).expect("domain");
        for (index_x, index_y) in history.iter().copied() {
            engine.set_selection_indices(index_x, index_y);
            engine.record_history();
        }
        engine.set_selection_indices(live_x, live_y);
        let before = engine.selection();

        let frame = engine.build_render_frame().expect("frame");

        prop_assert_eq!(engine.selection(), before);
        prop_assert_eq!(frame.layers.len(), history.len() + 1);
        for (layer, (index_x, index_y)) in frame.layers.iter().zip(history.iter().copied()) {
            prop_assert_eq!((layer.index_x, layer.index_y), (index_x, index_y));
        }
    }
}
