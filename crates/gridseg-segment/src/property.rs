//! Region properties and pruning
//!
//! Per-label streaming statistics over a `(LabelResult, ScalarGrid)`
//! pair: centroid, mean value, size, and a 2x2-covariance ellipse fit.
//! Also provides the label-compaction pruning used both by callers and
//! by the watershed finalize pass.

use crate::error::{SegmentError, SegmentResult};
use crate::segmenter::LabelResult;
use gridseg_core::{Pixel, ScalarGrid, ScalarStat};

/// Properties of one labeled region: geometric (centroid, size, shape)
/// and physical (mean of the underlying grid values).
///
/// All statistics are accumulated in a single streaming pass; no
/// per-cell lists are retained.
#[derive(Debug, Clone, Default)]
pub struct RegionProperty {
    row_stat: ScalarStat,
    col_stat: ScalarStat,
    val_stat: ScalarStat,
    rowcol_stat: ScalarStat,
}

impl RegionProperty {
    fn update(&mut self, row: usize, col: usize, val: i32) {
        let (r, c) = (row as f64, col as f64);
        self.row_stat.update(r);
        self.col_stat.update(c);
        self.val_stat.update(val as f64);
        self.rowcol_stat.update(r * c);
    }

    /// Centroid row coordinate.
    pub fn centroid_row(&self) -> f64 {
        self.row_stat.mean()
    }

    /// Centroid column coordinate.
    pub fn centroid_col(&self) -> f64 {
        self.col_stat.mean()
    }

    /// Mean grid value over the region.
    pub fn mean_value(&self) -> f64 {
        self.val_stat.mean()
    }

    /// Number of cells in the region.
    pub fn size(&self) -> usize {
        self.row_stat.count() as usize
    }

    /// Fit an ellipse to the region via the closed-form
    /// eigen-decomposition of the 2x2 spatial covariance matrix.
    /// Semi-axis lengths are `2 * sqrt(eigenvalue)`.
    pub fn ellipse_fit(&self) -> Ellipse {
        let center_row = self.row_stat.mean();
        let center_col = self.col_stat.mean();
        let s11 = self.row_stat.variance();
        let s22 = self.col_stat.variance();
        let s12 = self.rowcol_stat.mean() - center_row * center_col;
        let mut disc = (s11 - s22) * (s11 - s22) + 4.0 * s12 * s12;
        disc = if disc >= 1e-5 { disc.sqrt() } else { 0.0 };
        let eigen1 = (s11 + s22 + disc) / 2.0;
        let eigen2 = (s11 + s22 - disc) / 2.0;

        let norm = ((eigen1 - s11) * (eigen1 - s11) + s12 * s12).sqrt();
        let (v1, v2) = if norm > 1e-12 {
            (s12 / norm, (eigen1 - s11) / norm)
        } else {
            // diagonal covariance with the major axis along rows
            (1.0, 0.0)
        };

        let a = 2.0 * eigen1.max(0.0).sqrt();
        let b = 2.0 * eigen2.max(0.0).sqrt();
        let phi = v2.atan2(v1).to_degrees();
        Ellipse::new(center_row, center_col, a, b, phi)
    }

    /// Compute properties for every region of a labeling.
    ///
    /// Returns a vector indexed by region id, `1..=max_label`; index 0
    /// is reserved for the background and left empty.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError::ShapeMismatch`] if the label and value
    /// grids disagree in shape.
    pub fn compute(label: &LabelResult, data: &ScalarGrid) -> SegmentResult<Vec<RegionProperty>> {
        check_shapes(label, data)?;
        let mut props = vec![RegionProperty::default(); label.max_label + 1];
        for i in 0..data.rows() {
            for j in 0..data.cols() {
                let id = label.labels.at(i, j);
                if id > 0 {
                    props[id as usize].update(i, j, data.at(i, j));
                }
            }
        }
        Ok(props)
    }
}

/// An ellipse fitted to a region, in cell coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Ellipse {
    /// Center row coordinate.
    pub center_row: f64,
    /// Center column coordinate.
    pub center_col: f64,
    /// Semi-axis along the orientation.
    pub a: f64,
    /// Semi-axis across the orientation.
    pub b: f64,
    /// Orientation in degrees, measured from the row axis.
    pub phi: f64,
    sin_phi: f64,
    cos_phi: f64,
}

impl Ellipse {
    /// Create an ellipse; `phi` is in degrees.
    pub fn new(center_row: f64, center_col: f64, a: f64, b: f64, phi: f64) -> Self {
        Self {
            center_row,
            center_col,
            a,
            b,
            phi,
            sin_phi: phi.to_radians().sin(),
            cos_phi: phi.to_radians().cos(),
        }
    }

    /// Ratio of minor to major semi-axis; 1 for a degenerate fit.
    pub fn aspect_ratio(&self) -> f64 {
        if self.a != 0.0 { self.b / self.a } else { 1.0 }
    }

    /// Whether the point lies strictly inside the ellipse.
    pub fn contains(&self, row: f64, col: f64) -> bool {
        let or = row - self.center_row;
        let oc = col - self.center_col;
        let rot_r = or * self.cos_phi + oc * self.sin_phi;
        let rot_c = -or * self.sin_phi + oc * self.cos_phi;
        let dr = rot_r / self.a;
        let dc = rot_c / self.b;
        dr * dr + dc * dc < 1.0
    }
}

/// All the cells of each region, indexed by region id (index 0 is
/// empty). Unlike [`RegionProperty::compute`] this retains per-cell
/// lists; callers needing only aggregates should prefer the streaming
/// pass.
///
/// # Errors
///
/// Returns [`SegmentError::ShapeMismatch`] if the grids disagree in
/// shape.
pub fn region_pixels(label: &LabelResult, data: &ScalarGrid) -> SegmentResult<Vec<Vec<Pixel>>> {
    check_shapes(label, data)?;
    let mut regions: Vec<Vec<Pixel>> = vec![Vec::new(); label.max_label + 1];
    for i in 0..data.rows() {
        for j in 0..data.cols() {
            let id = label.labels.at(i, j);
            if id > 0 {
                regions[id as usize].push(Pixel::new(i as i32, j as i32, data.at(i, j)));
            }
        }
    }
    Ok(regions)
}

/// Remove the regions for which `keep` is false, renumbering the
/// survivors so ids stay contiguous `1..=k`.
///
/// # Errors
///
/// Returns [`SegmentError::InvalidParameters`] if `keep` is not
/// indexed `0..=max_label`.
pub fn prune(input: &LabelResult, keep: &[bool]) -> SegmentResult<LabelResult> {
    if keep.len() != input.max_label + 1 {
        return Err(SegmentError::InvalidParameters(format!(
            "keep has {} entries for {} regions",
            keep.len(),
            input.max_label
        )));
    }
    Ok(compact_labels(input, keep))
}

/// Remove regions smaller than `size_thresh` cells, renumbering the
/// survivors. With a threshold of 0 this is a no-op.
///
/// # Errors
///
/// Returns [`SegmentError::ShapeMismatch`] if the label and value
/// grids disagree in shape.
pub fn prune_by_size(
    input: &LabelResult,
    data: &ScalarGrid,
    size_thresh: usize,
) -> SegmentResult<LabelResult> {
    let props = RegionProperty::compute(input, data)?;
    let keep: Vec<bool> = props
        .iter()
        .enumerate()
        .map(|(id, p)| id > 0 && p.size() >= size_thresh)
        .collect();
    Ok(compact_labels(input, &keep))
}

/// Rewrite a labeling through an old-id -> new-id compaction map built
/// from `keep`. Shared by the pruning entry points and the watershed
/// finalize pass.
pub(crate) fn compact_labels(input: &LabelResult, keep: &[bool]) -> LabelResult {
    let mut new_id = vec![0i32; keep.len()];
    let mut num_regions = 0i32;
    for (old, &k) in keep.iter().enumerate().skip(1) {
        if k {
            num_regions += 1;
            new_id[old] = num_regions;
        }
    }

    let mut labels = ScalarGrid::like(&input.labels, 0, 0);
    for i in 0..labels.rows() {
        for j in 0..labels.cols() {
            let old = input.labels.at(i, j);
            if old > 0 {
                labels.set_unchecked(i, j, new_id[old as usize]);
            }
        }
    }
    LabelResult {
        labels,
        max_label: num_regions as usize,
    }
}

fn check_shapes(label: &LabelResult, data: &ScalarGrid) -> SegmentResult<()> {
    if !label.labels.same_shape(data) {
        return Err(SegmentError::ShapeMismatch {
            label_rows: label.labels.rows(),
            label_cols: label.labels.cols(),
            value_rows: data.rows(),
            value_cols: data.cols(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::Segmenter;
    use crate::threshold::ThresholdSegmenter;

    fn two_region_fixture() -> (ScalarGrid, LabelResult) {
        let data = ScalarGrid::from_rows(
            vec![
                vec![9, 9, 0, 0],
                vec![9, 9, 0, 0],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 6],
            ],
            -1,
        )
        .unwrap();
        let result = ThresholdSegmenter::new(5).label(&data);
        (data, result)
    }

    #[test]
    fn test_compute_centroid_and_mean() {
        let (data, result) = two_region_fixture();
        let props = RegionProperty::compute(&result, &data).unwrap();
        assert_eq!(props.len(), 3);
        assert_eq!(props[1].size(), 4);
        assert!((props[1].centroid_row() - 0.5).abs() < 1e-12);
        assert!((props[1].centroid_col() - 0.5).abs() < 1e-12);
        assert!((props[1].mean_value() - 9.0).abs() < 1e-12);
        assert_eq!(props[2].size(), 1);
        assert!((props[2].mean_value() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_compute_shape_mismatch() {
        let (_, result) = two_region_fixture();
        let other = ScalarGrid::new(3, 3, 0, -1).unwrap();
        assert!(matches!(
            RegionProperty::compute(&result, &other),
            Err(SegmentError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_region_pixels() {
        let (data, result) = two_region_fixture();
        let regions = region_pixels(&result, &data).unwrap();
        assert_eq!(regions[1].len(), 4);
        assert_eq!(regions[2], vec![Pixel::new(3, 3, 6)]);
    }

    #[test]
    fn test_prune_by_size() {
        let (data, result) = two_region_fixture();
        let pruned = prune_by_size(&result, &data, 2).unwrap();
        assert_eq!(pruned.max_label, 1);
        assert_eq!(pruned.labels.at(0, 0), 1);
        assert_eq!(pruned.labels.at(3, 3), 0);
    }

    #[test]
    fn test_prune_zero_threshold_is_noop() {
        let (data, result) = two_region_fixture();
        let pruned = prune_by_size(&result, &data, 0).unwrap();
        assert_eq!(pruned.max_label, result.max_label);
        assert_eq!(pruned.labels, result.labels);
    }

    #[test]
    fn test_prune_keep_mask() {
        let (_, result) = two_region_fixture();
        let pruned = prune(&result, &[false, false, true]).unwrap();
        assert_eq!(pruned.max_label, 1);
        assert_eq!(pruned.labels.at(3, 3), 1);
        assert_eq!(pruned.labels.at(0, 0), 0);
        assert!(prune(&result, &[false, true]).is_err());
    }

    #[test]
    fn test_ellipse_fit_elongated() {
        // 11x3 horizontal bar: major axis along columns
        let data = ScalarGrid::new(7, 15, 0, -1).unwrap();
        let mut labels = ScalarGrid::like(&data, 0, 0);
        for i in 2..5usize {
            for j in 2..13usize {
                labels.set(i, j, 1).unwrap();
            }
        }
        let result = LabelResult {
            labels,
            max_label: 1,
        };
        let props = RegionProperty::compute(&result, &data).unwrap();
        let e = props[1].ellipse_fit();
        assert!((e.center_row - 3.0).abs() < 1e-9);
        assert!((e.center_col - 7.0).abs() < 1e-9);
        // larger eigenvalue comes from the column spread
        assert!(e.a > e.b);
        assert!((e.phi.abs() - 90.0).abs() < 1e-6);
        assert!(e.contains(3.0, 7.0));
        assert!(!e.contains(3.0, 14.9));
        assert!(e.aspect_ratio() < 1.0);
    }
}
