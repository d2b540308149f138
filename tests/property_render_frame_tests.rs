use curve_rs::api::{PlotConfig, PlotEngine, PlotEngineConfig};
use curve_rs::core::{FunctionParams, RenderMode, Viewport};
use curve_rs::render::NullRenderer;
use proptest::prelude::*;

fn render_mode() -> impl Strategy<Value = RenderMode> {
    prop_oneof![
        Just(RenderMode::Line),
        Just(RenderMode::Point),
        Just(RenderMode::Vector),
        Just(RenderMode::Integral),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn every_emitted_endpoint_is_finite(
        index_x in -2i32..120,
        index_y in -2i32..120,
        offset_x in 0.0f64..=1.0,
        offset_y in 0.0f64..=1.0,
        count in 10i32..=20,
        scale in 1i32..=1000,
        balance in 0.0f64..=10.0,
        variance in 0.01f64..=10.0,
        mode in render_mode(),
        width in 16u32..2048,
        height in 16u32..2048,
    ) {
        let params = FunctionParams { mean: 1.0, variance, balance };
        let plot = PlotConfig::default()
            .with_offset(offset_x, offset_y)
            .with_domain(count, scale.min(40))
            .with_render_mode(mode)
            .with_params(params);
        let config = PlotEngineConfig::new(Viewport::new(width, height))
            .with_plot(plot)
            .with_selection(index_x, index_y);
        let mut engine = PlotEngine::new(NullRenderer::default(), config).expect("engine init");
        engine.record_history();
        engine.set_selection_indices(index_y, index_x);

        let frame = engine.build_render_frame().expect("frame");
        prop_assert_eq!(frame.layers.len(), 2);
        prop_assert!(frame.validate().is_ok());
        for layer in &frame.layers {
            prop_assert!(layer.lines.iter().all(|line|
                line.x1.is_finite()
                && line.y1.is_finite()
                && line.x2.is_finite()
                && line.y2.is_finite()
            ));
            let stats = layer.stats;
            prop_assert_eq!(
                stats.sampler.segments,
                stats.emitted + stats.culled + stats.overflowed
            );
            prop_assert_eq!(stats.emitted, layer.lines.len());
        }

        engine.render().expect("render");
        prop_assert_eq!(engine.renderer().last_layer_count, 2);
    }

    #[test]
    fn pure_curves_build_identical_frames(
        count in 10i32..=30,
        scale in 1i32..=30,
        offset_x in 0.0f64..=1.0,
    ) {
        let plot = PlotConfig::default()
            .with_domain(count, scale)
            .with_offset(offset_x, 0.5);
        let config = PlotEngineConfig::new(Viewport::new(640, 480)).with_plot(plot);
        let mut engine = PlotEngine::new(NullRenderer::default(), config).expect("engine init");
        engine.select_by_name("trig/sin(x)", "trig/cos(x)").expect("names");

        let first = engine.build_render_frame().expect("first frame");
        let second = engine.build_render_frame().expect("second frame");
        prop_assert_eq!(first, second);
    }
}
