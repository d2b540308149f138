#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use curve_rs::PlotError;
use curve_rs::api::{PlotConfig, PlotEngine, PlotEngineConfig};
use curve_rs::core::Viewport;
use curve_rs::render::{CairoRenderer, Color};

fn engine(width: u32, height: u32) -> PlotEngine<CairoRenderer> {
    let renderer = CairoRenderer::new(width as i32, height as i32).expect("renderer");
    let config = PlotEngineConfig::new(Viewport::new(width, height))
        .with_plot(PlotConfig::default().with_domain(10, 10));
    PlotEngine::new(renderer, config).expect("engine init")
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, PlotError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_backdrop_history_and_live_curve() {
    let mut engine = engine(400, 400);
    engine
        .select_by_name("trig/sin(x)", "trig/cos(x)")
        .expect("names");
    engine
        .set_foreground(Color::rgb(0.0, 0.0, 1.0))
        .expect("color");
    engine.record_history();
    engine
        .select_by_name("identity/t", "identity/t")
        .expect("names");
    engine.set_foreground(Color::RED).expect("color");

    engine.render().expect("render");
    let renderer = engine.into_renderer();
    let stats = renderer.last_stats();

    assert_eq!(renderer.backend_name(), "cairo");
    assert_eq!(stats.quads_drawn, 1);
    assert_eq!(stats.layers_drawn, 2);
    // Two grid lines plus 189 segments per layer at count 10, scale 10.
    assert_eq!(stats.lines_drawn, 2 + 189 + 189);
}

#[test]
fn cairo_renderer_exports_png() {
    let mut engine = engine(320, 240);
    engine.render().expect("render");

    let mut png = Vec::new();
    engine.renderer().write_png(&mut png).expect("png");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let mut engine = engine(600, 320);

    let surface = ImageSurface::create(Format::ARgb32, 600, 320).expect("surface");
    let context = Context::new(&surface).expect("context");
    engine
        .render_on_cairo_context(&context, 600.0, 320.0)
        .expect("render on context");

    let renderer = engine.into_renderer();
    assert_eq!(renderer.last_stats().layers_drawn, 1);
    assert!(renderer.last_stats().lines_drawn > 2);
}
