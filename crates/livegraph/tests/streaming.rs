//! End-to-end tests: producer appends through to renderer-ready geometry.

use glam::{DVec2, Vec2};
use livegraph::mesh::area_index_count;
use livegraph::*;

fn points(series: &Series) -> Vec<(f64, f64)> {
    series.iter().map(|p| (p.x, p.y)).collect()
}

// ============================================================================
// Ring buffer ordering
// ============================================================================

#[test]
fn test_under_capacity_yields_all_in_order() {
    let mut series = Series::new("s", 10);
    for i in 0..7 {
        series.add_data(i as f64, (i * i) as f64);
    }

    let expected: Vec<(f64, f64)> = (0..7).map(|i| (i as f64, (i * i) as f64)).collect();
    assert_eq!(points(&series), expected);
}

#[test]
fn test_over_capacity_yields_last_capacity() {
    let mut series = Series::new("s", 10);
    for i in 0..37 {
        series.add_data(i as f64, 0.0);
    }

    let xs: Vec<f64> = series.iter().map(|p| p.x).collect();
    let expected: Vec<f64> = (27..37).map(|i| i as f64).collect();
    assert_eq!(xs, expected);
}

#[test]
fn test_clear_empties() {
    let mut series = Series::new("s", 4);
    series.extend((0..9).map(|i| DataPoint::new(i as f64, 1.0)));
    series.clear();

    assert_eq!(series.iter().count(), 0);
    assert_eq!(series.prepare_geometry().live_count(), 0);
}

#[test]
fn test_capacity_three_end_to_end() {
    let mut series = Series::new("s", 3);
    for (x, y) in [(0.0, 1.0), (1.0, 2.0), (2.0, 3.0), (3.0, 4.0)] {
        series.add_data(x, y);
    }

    assert_eq!(points(&series), vec![(1.0, 2.0), (2.0, 3.0), (3.0, 4.0)]);
    assert_eq!(series.to_csv(), "1;2\n2;3\n3;4\n");
}

#[test]
fn test_csv_roundtrip_through_series() {
    let mut source = Series::new("a", 64);
    for i in 0..100 {
        let t = i as f64 / 7.0;
        source.add_data(t, (t * 1.3).cos() * 42.0);
    }

    let mut target = Series::new("b", 64);
    let report = target.load_csv_str(&source.to_csv());
    assert!(report.is_clean());

    assert_eq!(target.len(), source.len());
    for (a, b) in source.iter().zip(target.iter()) {
        assert!((a.x - b.x).abs() <= 1e-5);
        assert!((a.y - b.y).abs() <= 1e-5);
    }
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn test_rebuild_is_deterministic() {
    let mut series = Series::new("s", 16);
    series.extend((0..20).map(|i| DataPoint::new(i as f64, (i % 3) as f64)));

    let first = series.prepare_geometry().clone();
    let mut again = first.clone();
    again.rebuild(series.buffer());

    assert_eq!(first.positions(), again.positions());
    assert_eq!(first.bars().vertices, again.bars().vertices);
    assert_eq!(first.markers().vertices, again.markers().vertices);
    assert_eq!(first.area().indices, again.area().indices);
}

#[test]
fn test_area_topology_capacity_four() {
    let mut series = Series::new("s", 4);
    series.add_data(0.0, 1.0);

    let geometry = series.prepare_geometry();
    let area = geometry.area();
    assert_eq!(area.indices.len(), 12);
    assert_eq!(area_index_count(4), 12);
    assert!(area.indices.iter().all(|&i| i <= 7));
    assert_eq!(area.indices.chunks_exact(4).count(), 3);
    assert_eq!(area.indices, &[0, 1, 3, 2, 2, 3, 5, 4, 4, 5, 7, 6]);
}

#[test]
fn test_padding_collapses_onto_last_sample() {
    let mut series = Series::new("s", 5);
    series.add_data(1.0, 2.0);
    series.add_data(3.0, 4.0);

    let geometry = series.prepare_geometry();
    let positions = geometry.positions();
    assert!(!positions[0].is_padding());
    assert!(!positions[1].is_padding());
    for vertex in &positions[2..] {
        assert!(vertex.is_padding());
        assert_eq!((vertex.x(), vertex.y()), (3.0, 4.0));
    }
    assert_eq!(geometry.live_index_count(DrawStyle::Lines), 2);
    assert_eq!(geometry.live_index_count(DrawStyle::Area), 4);
}

#[test]
fn test_every_enabled_stream_is_sized_for_capacity() {
    let mut series = Series::new("s", 8).with_style(
        SeriesStyle::default().with_draw_mode(DrawMode::all()),
    );
    series.add_data(0.0, 0.0);

    let draw_mode = series.style().draw_mode;
    let geometry = series.prepare_geometry();
    for style in draw_mode.styles() {
        let stream = geometry.stream(style);
        let expected = match style {
            DrawStyle::Lines => 8,
            DrawStyle::Bars | DrawStyle::Area => 16,
            DrawStyle::Points => 32,
        };
        assert_eq!(stream.vertex_count(), expected, "{:?}", style);
        assert_eq!(stream.vertex_bytes().len() % 4, 0);
    }
}

// ============================================================================
// View following
// ============================================================================

#[test]
fn test_follow_caps_extent() {
    let settings = PlotSettings::default()
        .with_auto_adjust(true, false)
        .with_max_view_size(DVec2::new(10.0, 10.0));
    let view = ViewController::from_settings(&settings).shared();
    view.borrow_mut().set_rect(DataRect::new(0.0, 0.0, 10.0, 1.0));

    let mut series = Series::new("s", 16);
    follow(&view, &mut series);
    series.add_data(25.0, 0.5);

    let rect = view.borrow().rect();
    assert_eq!((rect.x_min(), rect.x_max()), (15.0, 25.0));
}

#[test]
fn test_follow_sees_offset_and_scale() {
    let view = ViewController::new().shared();
    view.borrow_mut().set_rect(DataRect::new(0.0, 0.0, 1.0, 1.0));
    view.borrow_mut().set_auto_follow(true, true);

    let mut series = Series::new("s", 16).with_style(
        SeriesStyle::default()
            .with_offset(DVec2::new(0.0, 100.0))
            .with_scale(DVec2::new(2.0, 1.0)),
    );
    follow(&view, &mut series);
    series.add_data(3.0, 0.0);

    let rect = view.borrow().rect();
    assert_eq!(rect.x_max(), 6.0);
    assert_eq!(rect.y_max(), 100.0);
}

#[test]
fn test_manual_pan_stops_following() {
    let view = ViewController::new().shared();
    view.borrow_mut().set_auto_follow(true, true);

    let mut series = Series::new("s", 16);
    let id = follow(&view, &mut series);
    series.add_data(5.0, 5.0);
    assert_eq!(view.borrow().rect().x_max(), 5.0);

    view.borrow_mut().pan(DVec2::new(-1.0, 0.0));
    let panned = view.borrow().rect();
    series.add_data(50.0, 50.0);
    assert_eq!(view.borrow().rect(), panned);

    assert!(series.remove_listener(id));
}

// ============================================================================
// Interaction
// ============================================================================

#[test]
fn test_hover_through_view_transform() {
    let mut series = Series::new("s", 16);
    series.add_data(2.0, 3.0);
    series.add_data(8.0, 1.0);

    let transform = ViewTransform::new(
        Rect::new(0.0, 0.0, 200.0, 100.0),
        DataRect::new(0.0, 0.0, 10.0, 5.0),
    );
    let cursor = transform.data_to_screen(DVec2::new(8.0, 1.0)) + Vec2::new(2.0, -2.0);
    assert_eq!(series.hit_test(&transform, cursor), Some(DataPoint::new(8.0, 1.0)));

    let uniform = series.uniform(&transform);
    assert_eq!(uniform.marker_size, [0.5, 1.0]);
    assert_eq!(uniform.transform, [0.0, 0.0, 1.0, 1.0]);
}

#[test]
fn test_grid_follows_view() {
    let view = ViewController::new();
    let grid = GridLines::compute(&view.rect());
    assert!(!grid.x.is_empty());
    assert!(!grid.y.is_empty());

    let mut view = view;
    view.set_rect(DataRect::new(0.0, 0.0, 100.0, 100.0));
    let grid = GridLines::compute(&view.rect());
    let majors: Vec<&str> = grid.major_x().filter_map(|l| l.label.as_deref()).collect();
    assert_eq!(majors.first(), Some(&"0"));
    assert_eq!(majors.last(), Some(&"100"));
}

#[test]
fn test_millisecond_timestamps_keep_a_usable_view() {
    use livegraph_core::config::MIN_VIEW_EXTENT;

    let clock = ManualClock::new(1.7e12);
    let mut registry = SeriesRegistry::with_clock(clock.clone());
    registry.register(Series::new("ts", 32));

    let view = ViewController::new().shared();
    view.borrow_mut().set_auto_follow(true, false);
    view.borrow_mut().set_max_extent(DVec2::new(1e-9, 1.0));
    let series = registry.get_mut("ts").expect("registered above");
    follow(&view, series);

    for _ in 0..4 {
        clock.advance(1.0);
        registry.add_value("ts", 0.0);
        let rect = view.borrow().rect();
        assert!(rect.width() >= MIN_VIEW_EXTENT);
        assert!(rect.contains(DVec2::new(registry.now(), 0.0)));
    }

    let transform = ViewTransform::new(Rect::new(0.0, 0.0, 200.0, 100.0), view.borrow().rect());
    let pixel = transform.data_to_screen(DVec2::new(registry.now(), 0.0));
    assert!(pixel.is_finite());

    transform.zoom_at_cursor(&mut view.borrow_mut(), pixel, -1000.0, true, false);
    let rect = view.borrow().rect();
    assert!(rect.width() >= MIN_VIEW_EXTENT);

    let grid = GridLines::compute(&rect);
    assert!(grid.x.iter().all(|l| l.value.is_finite()));
}
