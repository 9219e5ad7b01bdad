//! Enhanced watershed segmentation
//!
//! Multi-phase segmentation of a scalar grid into objects seeded at
//! local maxima, following Lakshmanan, Hondl and Rabin. The grid is
//! quantized into bins, well-separated seeds are nominated per bin,
//! and each seed grows a region under a tolerance that is relaxed over
//! successive passes. Accepted peaks carve a buffer of "foothill"
//! cells around themselves so neighboring peaks stay distinct.
//!
//! Internally a scratch claim grid tracks each cell as unclaimed,
//! claimed at a bin height, or globbed (permanently absorbed into a
//! foothill buffer). The claim grid lives only for the duration of one
//! `label()` call.

use crate::error::{SegmentError, SegmentResult};
use crate::property::compact_labels;
use crate::segmenter::{LabelResult, Segmenter};
use crate::threshold::ThresholdSegmenter;
use gridseg_core::{Pixel, ScalarGrid};
use std::collections::VecDeque;

/// Bin value for cells excluded from growth (missing or below the
/// minimum threshold).
const EXCLUDED: i32 = -1;

/// Per-cell claim state during one segmentation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Claim {
    /// Not yet part of any region.
    Unclaimed,
    /// Claimed by a region growing at the given bin height.
    Claimed(i32),
    /// Absorbed into a foothill buffer; can never become a peak or
    /// another peak's foothill.
    Globbed,
}

/// Scratch grid of claim states, rebuilt for every `label()` call.
#[derive(Debug)]
struct ClaimGrid {
    cols: usize,
    cells: Vec<Claim>,
}

impl ClaimGrid {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            cols,
            cells: vec![Claim::Unclaimed; rows * cols],
        }
    }

    /// Caller guarantees the coordinate is in bounds.
    fn at(&self, row: i32, col: i32) -> Claim {
        self.cells[row as usize * self.cols + col as usize]
    }

    fn set(&mut self, row: i32, col: i32, claim: Claim) {
        self.cells[row as usize * self.cols + col as usize] = claim;
    }

    fn reset(&mut self) {
        self.cells.fill(Claim::Unclaimed);
    }
}

/// An accepted peak together with the buffer candidates collected
/// while it grew.
#[derive(Debug)]
struct Glob {
    center: Pixel,
    foothills: Vec<Pixel>,
}

/// Enhanced watershed segmenter.
///
/// Construction parameters:
///
/// * `min_thresh` - cells at or below this value are excluded
/// * `data_incr` - quantization interval; use 1 to not quantize
/// * `max_thresh` - values above this are clamped to the top bin
/// * `min_size` - regions smaller than this many cells are discarded
/// * `delta` - how many data increments a region may range over; 0
///   keeps each region within the interval of its maximum, larger
///   values yield objects at larger scales
///
/// The result is fully deterministic: candidate cells are collected in
/// raster-scan order, and the growth frontier is expanded first-in
/// first-out.
#[derive(Debug, Clone, Copy)]
pub struct EnhancedWatershedSegmenter {
    min_thresh: i32,
    data_incr: i32,
    max_thresh: i32,
    min_size: usize,
    delta: u32,
}

impl EnhancedWatershedSegmenter {
    /// Create a segmenter, validating the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError::InvalidParameters`] if `data_incr <= 0`,
    /// `max_thresh <= min_thresh`, or `min_size < 1`.
    pub fn new(
        min_thresh: i32,
        data_incr: i32,
        max_thresh: i32,
        min_size: usize,
        delta: u32,
    ) -> SegmentResult<Self> {
        if data_incr <= 0 {
            return Err(SegmentError::InvalidParameters(format!(
                "data_incr must be positive, got {data_incr}"
            )));
        }
        if max_thresh <= min_thresh {
            return Err(SegmentError::InvalidParameters(format!(
                "max_thresh ({max_thresh}) must exceed min_thresh ({min_thresh})"
            )));
        }
        if min_size < 1 {
            return Err(SegmentError::InvalidParameters(
                "min_size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            min_thresh,
            data_incr,
            max_thresh,
            min_size,
            delta,
        })
    }

    fn max_bin(&self) -> usize {
        ((self.max_thresh - self.min_thresh) / self.data_incr) as usize
    }

    /// Phase A: quantize the raw grid into bin numbers.
    ///
    /// Returns the bin grid (EXCLUDED for missing or below-threshold
    /// cells) and the per-bin cell lists, collected in raster-scan
    /// order.
    fn quantize(&self, data: &ScalarGrid) -> (ScalarGrid, Vec<Vec<Pixel>>) {
        let max_bin = self.max_bin();
        let mut q = ScalarGrid::like(data, EXCLUDED, EXCLUDED);
        let mut bins: Vec<Vec<Pixel>> = vec![Vec::new(); max_bin + 1];
        for i in 0..data.rows() {
            for j in 0..data.cols() {
                let raw = data.at(i, j);
                if data.is_missing(raw) {
                    continue;
                }
                let bin = (raw - self.min_thresh).div_euclid(self.data_incr);
                if bin < 0 {
                    continue;
                }
                let bin = bin.min(max_bin as i32);
                q.set_unchecked(i, j, bin);
                bins[bin as usize].push(Pixel::new(i as i32, j as i32, bin));
            }
        }
        (q, bins)
    }

    /// Phase B: nominate well-separated seed candidates per bin.
    ///
    /// A candidate claims the full influence square around itself,
    /// all-or-nothing: if any cell of the square is out of bounds or
    /// already claimed, the attempt rolls back. Strong peaks get a
    /// smaller influence half-width than weak ones, so trusted maxima
    /// need less enforced separation while noise-driven candidates at
    /// low bins must stand further apart.
    fn find_seeds(
        &self,
        q: &ScalarGrid,
        bins: &[Vec<Pixel>],
        claim: &mut ClaimGrid,
    ) -> Vec<Vec<Pixel>> {
        let max_bin = bins.len() - 1;
        let min_infl = 1 + (0.5 * (self.min_size as f64).sqrt()).round() as i32;
        let max_infl = 2 * min_infl;
        let mut centers: Vec<Vec<Pixel>> = vec![Vec::new(); bins.len()];
        let mut claimed_this_attempt: Vec<(i32, i32)> = Vec::new();
        for bin in (0..=max_bin).rev() {
            let infl = if max_bin == 0 {
                min_infl
            } else {
                min_infl
                    + (bin as f64 / max_bin as f64 * (max_infl - min_infl) as f64).round() as i32
            };
            for p in &bins[bin] {
                if claim.at(p.row, p.col) != Claim::Unclaimed {
                    continue;
                }
                claimed_this_attempt.clear();
                let mut ok = true;
                'attempt: for i in (p.row - infl)..=(p.row + infl) {
                    for j in (p.col - infl)..=(p.col + infl) {
                        if !q.in_bounds(i, j) || claim.at(i, j) != Claim::Unclaimed {
                            ok = false;
                            break 'attempt;
                        }
                        claim.set(i, j, Claim::Claimed(bin as i32));
                        claimed_this_attempt.push((i, j));
                    }
                }
                if ok {
                    centers[bin].push(*p);
                } else {
                    for &(i, j) in &claimed_this_attempt {
                        claim.set(i, j, Claim::Unclaimed);
                    }
                }
            }
        }
        centers
    }

    /// Grow one candidate region from `center` at tolerance
    /// `bin_lower`. Returns whether the maximum was captured.
    ///
    /// Cells joining the frontier are claimed at the center's nominal
    /// height. Lower in-range neighbors are collected as foothill
    /// candidates but not claimed. On exhaustion:
    ///
    /// * at least `min_size` cells -> accepted, foothills recorded
    /// * undersized but extendable at a lower tolerance -> rolled back
    ///   so the caller can defer the candidate
    /// * undersized and not extendable -> kept as a terminal speck for
    ///   the final size prune to remove
    fn claim_region(
        &self,
        q: &ScalarGrid,
        claim: &mut ClaimGrid,
        center: Pixel,
        bin_lower: i32,
        foothills: &mut Vec<Glob>,
    ) -> bool {
        let mut frontier: VecDeque<Pixel> = VecDeque::new();
        let mut as_glob: Vec<Pixel> = Vec::new();
        let mut claimed_this_run: Vec<Pixel> = Vec::new();
        let mut extendable = false;
        frontier.push_back(center);
        while let Some(p) = frontier.pop_front() {
            if claim.at(p.row, p.col) != Claim::Unclaimed {
                continue;
            }
            claim.set(p.row, p.col, Claim::Claimed(center.value));
            claimed_this_run.push(p);
            for i in (p.row - 1)..=(p.row + 1) {
                for j in (p.col - 1)..=(p.col + 1) {
                    if !q.in_bounds(i, j) || claim.at(i, j) != Claim::Unclaimed {
                        continue;
                    }
                    let qv = q.at(i as usize, j as usize);
                    if !extendable && qv >= 0 && qv < center.value {
                        extendable = true;
                    }
                    if qv >= bin_lower {
                        frontier.push_back(Pixel::new(i, j, qv));
                    } else if qv >= 0 {
                        // not claimed: a channel of globbed cells will
                        // form here and keep the peak separate from
                        // its foothills
                        as_glob.push(Pixel::new(i, j, qv));
                    }
                }
            }
        }

        // a height-0 candidate has nowhere lower to go
        if center.value == 0 {
            extendable = false;
        }
        let big_enough = claimed_this_run.len() >= self.min_size;
        if big_enough {
            foothills.push(Glob {
                center,
                foothills: as_glob,
            });
        } else if extendable {
            for p in &claimed_this_run {
                claim.set(p.row, p.col, Claim::Unclaimed);
            }
        }
        big_enough || !extendable
    }

    /// Carve the foothill buffers recorded at this `(bin, delta)` step.
    ///
    /// Expansion follows monotonic descent (`Q[n] <= Q[f]`) or, for
    /// cells below the popped one, proximity to the owning center. The
    /// proximity tie-break only competes against centers whose bin is
    /// at least half the owning center's, so minor peaks cannot carve
    /// into a major peak's territory.
    fn remove_foothills(
        &self,
        q: &ScalarGrid,
        claim: &mut ClaimGrid,
        bin_lower: i32,
        centers: &[Vec<Pixel>],
        globs: Vec<Glob>,
    ) {
        for glob in globs {
            let mut stack = glob.foothills;
            while let Some(p) = stack.pop() {
                claim.set(p.row, p.col, Claim::Globbed);
                for i in (p.row - 1)..=(p.row + 1) {
                    for j in (p.col - 1)..=(p.col + 1) {
                        if !q.in_bounds(i, j) || claim.at(i, j) != Claim::Unclaimed {
                            continue;
                        }
                        let qv = q.at(i as usize, j as usize);
                        if qv >= 0
                            && qv < bin_lower
                            && (qv <= p.value
                                || is_closest(&Pixel::new(i, j, qv), &glob.center, centers))
                        {
                            stack.push(Pixel::new(i, j, qv));
                        }
                    }
                }
            }
        }
    }

    /// Phases A-C: returns the claim-height grid (EXCLUDED for cells
    /// that ended up unclaimed or globbed).
    fn find_local_maxima(&self, data: &ScalarGrid) -> ScalarGrid {
        let (q, bins) = self.quantize(data);
        let max_bin = bins.len() - 1;
        let mut claim = ClaimGrid::new(data.rows(), data.cols());

        let centers = self.find_seeds(&q, &bins, &mut claim);
        // the seed pass only chooses well-separated candidates; growth
        // starts from a clean slate
        claim.reset();

        for delta_pass in 0..=self.delta {
            let mut deferred_to_next: Vec<Pixel> = Vec::new();
            for bin in (0..=max_bin).rev() {
                let bin_lower = (bin as i32 - delta_pass as i32).max(0);
                let deferred_from_last = std::mem::take(&mut deferred_to_next);
                let mut foothills: Vec<Glob> = Vec::new();
                for center in centers[bin].iter().chain(deferred_from_last.iter()) {
                    if claim.at(center.row, center.col) != Claim::Unclaimed {
                        continue;
                    }
                    let captured =
                        self.claim_region(&q, &mut claim, *center, bin_lower, &mut foothills);
                    if !captured {
                        // retry at the next lower bin with the
                        // effective height decremented
                        deferred_to_next
                            .push(Pixel::new(center.row, center.col, center.value - 1));
                    }
                }
                self.remove_foothills(&q, &mut claim, bin_lower, &centers, foothills);
            }
            // deferrals left over at bin 0 are dropped; the next pass
            // restarts from the registered seeds with a wider tolerance
        }

        let mut heights = ScalarGrid::like(data, EXCLUDED, EXCLUDED);
        for i in 0..data.rows() {
            for j in 0..data.cols() {
                if let Claim::Claimed(h) = claim.at(i as i32, j as i32) {
                    heights.set_unchecked(i, j, h);
                }
            }
        }
        heights
    }
}

impl Segmenter for EnhancedWatershedSegmenter {
    fn label(&self, data: &ScalarGrid) -> LabelResult {
        let heights = self.find_local_maxima(data);
        // claim heights are bin tags, not unique ids: two unrelated
        // peaks at the same height share a tag, so a connectivity
        // relabel assigns unique sequential ids
        let initial = ThresholdSegmenter::new(0).label(&heights);
        let sizes = initial.region_sizes();
        let keep: Vec<bool> = sizes
            .iter()
            .enumerate()
            .map(|(id, &size)| id > 0 && size >= self.min_size)
            .collect();
        compact_labels(&initial, &keep)
    }
}

/// Whether `p` is closer to `center` than to every competing center
/// whose bin height is at least half of `center`'s.
fn is_closest(p: &Pixel, center: &Pixel, centers: &[Vec<Pixel>]) -> bool {
    let bin_thresh = (center.value / 2).max(0) as usize;
    let my_dist = p.distance_squared(center);
    for bin_centers in centers.iter().skip(bin_thresh) {
        for other in bin_centers {
            if p.distance_squared(other) < my_dist {
                return false;
            }
        }
    }
    true
}
