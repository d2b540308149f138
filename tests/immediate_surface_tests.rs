use curve_rs::PlotError;
use curve_rs::api::{PlotEngine, PlotEngineConfig};
use curve_rs::core::Viewport;
use curve_rs::render::{
    BatchKind, Color, ImmediateRenderer, ImmediateSurface, RecordingSurface, RenderFrame,
    Renderer, SurfaceCommand,
};

const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

#[test]
fn frame_replays_as_ortho_scoped_batches_in_draw_order() {
    let renderer = ImmediateRenderer::new(RecordingSurface::default());
    let config = PlotEngineConfig::new(Viewport::new(640, 640));
    let mut engine = PlotEngine::new(renderer, config).expect("engine init");

    engine.select_by_name("trig/sin(x)", "trig/cos(x)").expect("names");
    engine.set_foreground(BLUE).expect("color");
    engine.record_history();
    engine.select_by_name("identity/t", "power/x^2").expect("names");
    engine.record_history();
    engine.set_foreground(Color::RED).expect("color");

    engine.render().expect("render");
    let surface = engine.into_renderer().into_surface();
    let commands = surface.commands();

    assert_eq!(commands.first(), Some(&SurfaceCommand::PushOrtho));
    assert_eq!(commands.last(), Some(&SurfaceCommand::PopMatrix));
    assert_eq!(surface.batch_count(BatchKind::Quads), 1);
    // Grid batch, two history layers, live layer.
    assert_eq!(surface.batch_count(BatchKind::Lines), 4);
    assert_eq!(
        surface.line_batch_colors(),
        vec![Color::GRAY, BLUE, BLUE, Color::RED]
    );
    assert_eq!(
        commands
            .iter()
            .filter(|command| **command == SurfaceCommand::End)
            .count(),
        5
    );
    assert_eq!(surface.vertex_count() % 2, 0);
}

#[test]
fn empty_layers_still_get_their_own_batch() {
    let renderer = ImmediateRenderer::new(RecordingSurface::default());
    let config = PlotEngineConfig::new(Viewport::new(640, 640));
    let mut engine = PlotEngine::new(renderer, config).expect("engine init");
    // e^t > 0 with the origin on the top-right corner culls every segment.
    // The short domain keeps e^t far enough from zero that y never rounds to 1.
    engine.set_domain(10, 10).expect("domain");
    engine.set_offset(1.0, 1.0).expect("offset");
    engine.select_by_name("exp/e^x", "exp/e^x").expect("names");
    engine.record_history();

    let frame = engine.build_render_frame().expect("frame");
    assert!(frame.layers.iter().all(|layer| layer.lines.is_empty()));
    assert!(frame.layers.iter().all(|layer| layer.stats.culled == 189));

    engine.render().expect("render");
    let surface = engine.renderer().surface();
    assert_eq!(surface.batch_count(BatchKind::Lines), 3);
    // Background quad corners plus the two grid lines.
    assert_eq!(surface.vertex_count(), 4 + 4);
}

#[test]
fn recording_surface_rejects_unbalanced_calls() {
    let mut surface = RecordingSurface::default();
    assert!(matches!(surface.end(), Err(PlotError::Backend(_))));
    assert!(matches!(
        surface.emit_vertex(0.0, 0.0, 0.0),
        Err(PlotError::Backend(_))
    ));
    assert!(matches!(surface.pop_matrix(), Err(PlotError::Backend(_))));

    surface.begin_lines().expect("begin");
    assert!(matches!(surface.begin_quads(), Err(PlotError::Backend(_))));
    surface.end().expect("end");
}

#[test]
fn immediate_renderer_rejects_non_finite_geometry() {
    use curve_rs::render::{CurveLayer, LayerSource, LinePrimitive};

    let mut layer = CurveLayer::new(LayerSource::Live, 0, 0, Color::RED);
    layer
        .lines
        .push(LinePrimitive::new(0.0, f64::NAN, 1.0, 1.0, Color::RED));
    let frame = RenderFrame::new(Viewport::new(100, 100)).with_layer(layer);

    let mut renderer = ImmediateRenderer::new(RecordingSurface::default());
    assert!(renderer.render(&frame).is_err());
    assert!(renderer.surface().commands().is_empty());
}
