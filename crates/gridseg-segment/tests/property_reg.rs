//! Region property regression test
//!
//! Streaming statistics over a labeling: centroids, mean values,
//! ellipse fits, and the pruning entry points.

use gridseg_core::ScalarGrid;
use gridseg_segment::{
    EnhancedWatershedSegmenter, RegionProperty, SegmentError, Segmenter, ThresholdSegmenter, prune,
    prune_by_size, region_pixels,
};
use gridseg_test::{RegParams, add_cone, missing_grid};

#[test]
fn property_reg() {
    let mut rp = RegParams::new("property");

    // two cones of different strength on a 20x20 grid
    let mut data = missing_grid(20, 20, -1).expect("grid");
    add_cone(&mut data, 5, 5, 30, 2);
    add_cone(&mut data, 14, 14, 12, 2);
    let result = ThresholdSegmenter::new(0).label(&data);
    rp.compare_values(2.0, result.max_label as f64, 0.0);

    // --- Test 1: centroid, size, mean value per region ---
    eprintln!("=== aggregates ===");
    let props = RegionProperty::compute(&result, &data).expect("compute");
    rp.compare_values(3.0, props.len() as f64, 0.0);
    rp.compare_values(25.0, props[1].size() as f64, 0.0);
    rp.compare_values(5.0, props[1].centroid_row(), 1e-9);
    rp.compare_values(5.0, props[1].centroid_col(), 1e-9);
    rp.compare_values(14.0, props[1].mean_value(), 1e-9);
    rp.compare_values(14.0, props[2].centroid_row(), 1e-9);
    rp.compare_values(14.0, props[2].centroid_col(), 1e-9);
    rp.compare_values(5.6, props[2].mean_value(), 1e-9);

    // --- Test 2: watershed centroids land on the peaks ---
    eprintln!("=== watershed centroids ===");
    let mut two = missing_grid(30, 30, -1).expect("grid");
    add_cone(&mut two, 8, 8, 50, 2);
    add_cone(&mut two, 22, 22, 10, 2);
    let seg = EnhancedWatershedSegmenter::new(0, 1, 50, 5, 1).expect("params");
    let labeled = seg.label(&two);
    rp.compare_values(2.0, labeled.max_label as f64, 0.0);
    let wprops = RegionProperty::compute(&labeled, &two).expect("compute");
    rp.compare_values(8.0, wprops[1].centroid_row(), 1.0);
    rp.compare_values(8.0, wprops[1].centroid_col(), 1.0);
    rp.compare_values(22.0, wprops[2].centroid_row(), 1.0);
    rp.compare_values(22.0, wprops[2].centroid_col(), 1.0);

    // --- Test 3: ellipse fit of an elongated region ---
    eprintln!("=== ellipse ===");
    let mut bar = ScalarGrid::new(20, 20, 0, -1).expect("grid");
    for i in 10..13usize {
        for j in 2..13usize {
            bar.set(i, j, 9).expect("set");
        }
    }
    let bar_result = ThresholdSegmenter::new(0).label(&bar);
    let bar_props = RegionProperty::compute(&bar_result, &bar).expect("compute");
    let e = bar_props[1].ellipse_fit();
    rp.compare_values(11.0, e.center_row, 1e-9);
    rp.compare_values(7.0, e.center_col, 1e-9);
    rp.check("major axis along the columns", e.a > e.b);
    rp.compare_values(90.0, e.phi.abs(), 1e-6);
    rp.compare_values(2.0 * 10.0f64.sqrt(), e.a, 1e-9);
    rp.check("ellipse contains its center", e.contains(11.0, 7.0));
    rp.check("ellipse excludes far cells", !e.contains(11.0, 19.0));
    rp.check("aspect ratio below 1", e.aspect_ratio() < 1.0);

    // --- Test 4: per-region pixel lists agree with the aggregates ---
    let regions = region_pixels(&result, &data).expect("pixels");
    rp.compare_values(props[1].size() as f64, regions[1].len() as f64, 0.0);
    rp.compare_values(props[2].size() as f64, regions[2].len() as f64, 0.0);
    rp.check("background list empty", regions[0].is_empty());

    // --- Test 5: pruning ---
    eprintln!("=== pruning ===");
    let noop = prune_by_size(&result, &data, 0).expect("prune");
    rp.compare_values(result.max_label as f64, noop.max_label as f64, 0.0);
    rp.compare_grids(&result.labels, &noop.labels);

    let all = prune_by_size(&result, &data, 26).expect("prune");
    rp.compare_values(0.0, all.max_label as f64, 0.0);

    let second_only = prune(&result, &[false, false, true]).expect("prune");
    rp.compare_values(1.0, second_only.max_label as f64, 0.0);
    rp.compare_values(1.0, second_only.labels.at(14, 14) as f64, 0.0);
    rp.compare_values(0.0, second_only.labels.at(5, 5) as f64, 0.0);

    // --- Test 6: error contracts ---
    let small = ScalarGrid::new(5, 5, 0, -1).expect("grid");
    rp.check(
        "shape mismatch rejected",
        matches!(
            RegionProperty::compute(&result, &small),
            Err(SegmentError::ShapeMismatch { .. })
        ),
    );
    rp.check(
        "bad keep mask rejected",
        matches!(
            prune(&result, &[false, true]),
            Err(SegmentError::InvalidParameters(_))
        ),
    );

    assert!(rp.cleanup(), "property regression test failed");
}
