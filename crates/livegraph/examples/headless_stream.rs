//! Headless streaming example.
//!
//! Feeds two series through a registry at a simulated 60 Hz, keeps a view
//! following the newest samples and prepares geometry every frame the way a
//! renderer would, logging what it would upload.
//!
//! Run with `RUST_LOG=livegraph=trace` to see every rebuild.

use glam::Vec2;
use livegraph::*;
use livegraph_core::logging;
use livegraph_core::profiling::{ProfilingBackend, init_profiling, new_frame, profile_scope};

const FRAMES: usize = 600;
const FRAME_TIME: f64 = 1.0 / 60.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    init_profiling(ProfilingBackend::InProcess);

    let settings = PlotSettings::default()
        .with_auto_adjust(true, true)
        .with_default_capacity(240);

    let clock = ManualClock::new(0.0);
    let mut registry = SeriesRegistry::with_clock(clock.clone());

    let view = ViewController::from_settings(&settings).shared();

    let mut sine = Series::from_settings("sine", &settings).with_style(
        SeriesStyle::default()
            .with_draw_mode(DrawMode::LINES | DrawMode::POINTS)
            .with_color(Color::GREEN),
    );
    follow(&view, &mut sine);
    registry.register(sine);

    registry.register(
        Series::from_settings("square", &settings)
            .with_style(
                SeriesStyle::default()
                    .with_draw_mode(DrawMode::BARS | DrawMode::AREA)
                    .with_color(Color::rgba(0.2, 0.4, 1.0, 0.5)),
            )
            .with_clear_on_start(false),
    );
    registry.begin_session();

    let screen = Rect::new(0.0, 0.0, 800.0, 400.0);

    for frame in 0..FRAMES {
        new_frame();
        clock.advance(FRAME_TIME);

        let t = registry.now();
        registry.add_value("sine", (t * 2.0).sin());
        registry.add_value("square", if (t * 0.5).fract() < 0.5 { 1.0 } else { -1.0 });

        profile_scope!("prepare_frame");
        let transform = ViewTransform::new(screen, view.borrow().rect());
        for series in registry.iter_mut() {
            let uniform = series.uniform(&transform);
            let draw_mode = series.style().draw_mode;
            let name = series.name().to_string();
            let geometry = series.prepare_geometry();

            if frame % 120 == 0 {
                for style in draw_mode.styles() {
                    let stream = geometry.stream(style);
                    tracing::info!(
                        "frame {:>3} '{}' {:?}: {} bytes of vertices, {} live indices, color {:?}",
                        frame,
                        name,
                        style,
                        stream.vertex_bytes().len(),
                        geometry.live_index_count(style),
                        uniform.color
                    );
                }
            }
        }
    }

    let rect = view.borrow().rect();
    tracing::info!(
        "View after {} frames: x {:.2}..{:.2}, y {:.2}..{:.2}",
        FRAMES,
        rect.x_min(),
        rect.x_max(),
        rect.y_min(),
        rect.y_max()
    );

    let grid = GridLines::compute(&rect);
    let labels: Vec<&str> = grid.major_x().filter_map(|l| l.label.as_deref()).collect();
    tracing::info!("Major X labels: {}", labels.join(", "));

    let transform = ViewTransform::new(screen, rect);
    let cursor = Vec2::new(screen.right() - 1.0, screen.height * 0.5);
    let sine = registry.lookup("sine")?;
    match sine.hit_test(&transform, cursor) {
        Some(point) => tracing::info!("Hovering sample ({:.3}, {:.3})", point.x, point.y),
        None => tracing::info!("No sample under cursor"),
    }

    let path = std::env::temp_dir().join("livegraph_sine.csv");
    registry.save_csv("sine", &path)?;
    tracing::info!("Saved {} samples to {}", sine.len(), path.display());

    Ok(())
}
