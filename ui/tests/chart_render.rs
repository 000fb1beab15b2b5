//! Renders the bundled dashboard dataset through both chart backends.

use ui::{
    chart::{render_bar_chart, ChartSize, ChartStyle, RecordingSurface},
    core::loader::parse_snapshot,
};

const DATASET: &str = include_str!("../assets/data/mock_dashboard.json");

#[test]
fn bundled_dataset_draws_one_pair_per_category() {
    let snapshot = parse_snapshot(DATASET).expect("bundled dataset is valid");
    let items = &snapshot.broadband_pack;
    let mut surface = RecordingSurface::new();

    let layout = render_bar_chart(
        &mut surface,
        items,
        ChartSize::new(600.0, 240.0),
        1.0,
        &ChartStyle::default(),
    )
    .expect("chart renders");

    assert_eq!(layout.groups.len(), items.len());
    assert_eq!(surface.rects().len(), items.len() * 2);
    assert_eq!(surface.open_saves(), 0);

    let texts = surface.texts();
    for item in items {
        assert!(texts.contains(&item.label.as_str()), "missing {}", item.label);
    }
    assert!(texts.contains(&"+13.4%"));
    assert!(texts.contains(&"-11.6%"));
    assert!(texts.contains(&"178.9M"));
    assert!(texts.contains(&"0.0M"));
}

#[test]
fn tallest_bar_reaches_the_top_of_the_plot() {
    let snapshot = parse_snapshot(DATASET).expect("bundled dataset is valid");
    let mut surface = RecordingSurface::new();
    let style = ChartStyle::default();

    let layout = render_bar_chart(
        &mut surface,
        &snapshot.broadband_pack,
        ChartSize::new(600.0, 240.0),
        1.0,
        &style,
    )
    .expect("chart renders");

    let tallest = surface
        .rects()
        .into_iter()
        .map(|(rect, _)| rect.height)
        .fold(0.0_f64, f64::max);
    assert!((tallest - layout.plot.height).abs() < 1e-9);
    assert!((layout.max_value - 178.9).abs() < 1e-9);
}

#[cfg(not(target_arch = "wasm32"))]
#[test]
fn bundled_dataset_rasterises_to_png() {
    let snapshot = parse_snapshot(DATASET).expect("bundled dataset is valid");
    let bytes = ui::chart::render_png(
        &snapshot.broadband_pack,
        ChartSize::new(600.0, 240.0),
        2.0,
        &ChartStyle::default().for_export(),
    )
    .expect("png renders");

    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}
