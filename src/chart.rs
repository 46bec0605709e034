//! Task-state aggregation and pie-chart rasterization.
//!
//! The aggregation is a single group-by-count over the task list.  The pie
//! raster is produced with the `image` crate by classifying every pixel into
//! a slice; the raster layer draws no glyphs, so the chart title and legend
//! are rendered as document text next to the embedded image.

use std::collections::BTreeMap;
use std::io::Cursor;

use image::{DynamicImage, ImageBuffer, ImageOutputFormat, Rgb};

use crate::error::ReportError;
use crate::model::Task;

/// Default raster canvas width in pixels.
pub const DEFAULT_CHART_WIDTH: u32 = 500;
/// Default raster canvas height in pixels.
pub const DEFAULT_CHART_HEIGHT: u32 = 400;

const BACKGROUND: [u8; 3] = [255, 255, 255];
const OUTLINE: [u8; 3] = [96, 96, 96];
const RADIUS_RATIO: f64 = 0.42;
const OUTLINE_THICKNESS_PX: f64 = 1.5;

/// Slice fill colors, cycled by slice index.  The document legend resolves
/// its swatches through [`PieChart::slice_color`] so both stay in sync.
const PALETTE: [[u8; 3]; 8] = [
    [230, 97, 90],
    [88, 144, 255],
    [246, 189, 96],
    [90, 169, 114],
    [155, 107, 200],
    [84, 186, 185],
    [222, 125, 170],
    [148, 148, 148],
];

/// Groups tasks by state code and counts the occurrences.
///
/// Every task contributes to exactly one bucket; the sum of all counts equals
/// the input length.  An empty input yields an empty map.
pub fn state_distribution(tasks: &[Task]) -> BTreeMap<i32, u64> {
    let mut counts = BTreeMap::new();
    for task in tasks {
        *counts.entry(task.state()).or_insert(0) += 1;
    }
    counts
}

/// One labeled slice of a pie chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PieSlice {
    label: String,
    count: u64,
}

impl PieSlice {
    /// Returns the display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the slice count.
    pub fn count(&self) -> u64 {
        self.count
    }
}

/// A titled pie chart that rasterizes into PNG bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PieChart {
    title: String,
    slices: Vec<PieSlice>,
}

impl PieChart {
    /// Creates an empty chart with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slices: Vec::new(),
        }
    }

    /// Builds a chart from a state distribution, one slice per state code in
    /// ascending order, labeled `State {code}`.
    pub fn from_distribution(title: impl Into<String>, distribution: &BTreeMap<i32, u64>) -> Self {
        let mut chart = Self::new(title);
        for (state, count) in distribution {
            chart = chart.with_slice(format!("State {state}"), *count);
        }
        chart
    }

    /// Appends a slice and returns the updated chart.
    pub fn with_slice(mut self, label: impl Into<String>, count: u64) -> Self {
        self.slices.push(PieSlice {
            label: label.into(),
            count,
        });
        self
    }

    /// Returns the chart title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the slices in insertion order.
    pub fn slices(&self) -> &[PieSlice] {
        &self.slices
    }

    /// Returns the fill color for the slice at `index`.
    pub fn slice_color(index: usize) -> [u8; 3] {
        PALETTE[index % PALETTE.len()]
    }

    /// Rasterizes the chart onto a white canvas and encodes it as PNG bytes.
    ///
    /// A chart without counts renders a blank canvas rather than failing.
    pub fn render_png(&self, width: u32, height: u32) -> Result<Vec<u8>, ReportError> {
        let total: u64 = self.slices.iter().map(PieSlice::count).sum();
        let boundaries = slice_boundaries(&self.slices, total);

        let cx = f64::from(width) / 2.0;
        let cy = f64::from(height) / 2.0;
        let radius = RADIUS_RATIO * f64::from(width.min(height));

        let buffer = ImageBuffer::from_fn(width, height, |x, y| {
            let dx = f64::from(x) + 0.5 - cx;
            let dy = f64::from(y) + 0.5 - cy;
            let distance = (dx * dx + dy * dy).sqrt();

            if total == 0 || distance > radius {
                return Rgb(BACKGROUND);
            }
            if distance > radius - OUTLINE_THICKNESS_PX {
                return Rgb(OUTLINE);
            }
            Rgb(Self::slice_color(slice_index(&boundaries, fraction_of_turn(dx, dy))))
        });

        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(buffer)
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
        Ok(bytes)
    }
}

fn slice_boundaries(slices: &[PieSlice], total: u64) -> Vec<f64> {
    let mut boundaries = Vec::with_capacity(slices.len());
    if total == 0 {
        return boundaries;
    }
    let mut cumulative = 0u64;
    for slice in slices {
        cumulative += slice.count;
        boundaries.push(cumulative as f64 / total as f64);
    }
    boundaries
}

/// Maps a pixel offset from the pie center to a fraction of a full turn,
/// measured clockwise from twelve o'clock.  Raster rows grow downwards.
fn fraction_of_turn(dx: f64, dy: f64) -> f64 {
    let turn = dx.atan2(-dy) / (2.0 * std::f64::consts::PI);
    if turn < 0.0 {
        turn + 1.0
    } else {
        turn
    }
}

fn slice_index(boundaries: &[f64], turn: f64) -> usize {
    boundaries
        .iter()
        .position(|end| turn < *end)
        .unwrap_or(boundaries.len().saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::{
        fraction_of_turn, state_distribution, PieChart, DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH,
    };
    use crate::model::Task;
    use image::GenericImageView;

    fn task_in_state(state: i32) -> Task {
        Task::new(state, "t", "d", state, 1)
    }

    #[test]
    fn distribution_counts_every_task_once() {
        let tasks = vec![task_in_state(1), task_in_state(1), task_in_state(2)];
        let distribution = state_distribution(&tasks);

        assert_eq!(distribution.len(), 2);
        assert_eq!(distribution.get(&1), Some(&2));
        assert_eq!(distribution.get(&2), Some(&1));
        assert_eq!(distribution.values().sum::<u64>(), tasks.len() as u64);
    }

    #[test]
    fn empty_input_yields_empty_distribution() {
        assert!(state_distribution(&[]).is_empty());
    }

    #[test]
    fn chart_slices_carry_state_labels() {
        let tasks = vec![task_in_state(3), task_in_state(1)];
        let chart = PieChart::from_distribution("Task State Distribution", &state_distribution(&tasks));

        let labels: Vec<_> = chart.slices().iter().map(|s| s.label().to_owned()).collect();
        assert_eq!(labels, ["State 1", "State 3"]);
    }

    #[test]
    fn render_png_produces_canvas_of_requested_size() {
        let chart = PieChart::new("Task State Distribution")
            .with_slice("State 1", 2)
            .with_slice("State 2", 1);
        let bytes = chart
            .render_png(DEFAULT_CHART_WIDTH, DEFAULT_CHART_HEIGHT)
            .unwrap();

        let decoded = image::load_from_memory(&bytes).expect("decode rendered chart");
        assert_eq!(
            decoded.dimensions(),
            (DEFAULT_CHART_WIDTH, DEFAULT_CHART_HEIGHT)
        );
    }

    #[test]
    fn empty_chart_renders_blank_canvas() {
        let chart = PieChart::new("Task State Distribution");
        let bytes = chart.render_png(100, 80).unwrap();
        let decoded = image::load_from_memory(&bytes).expect("decode rendered chart");

        let rgb = decoded.to_rgb8();
        assert!(rgb.pixels().all(|p| p.0 == [255, 255, 255]));
    }

    #[test]
    fn pie_center_column_splits_majority_slice() {
        // Two-thirds of the turn belongs to the first slice, so a pixel just
        // right of twelve o'clock lands in it and one just left does not.
        let chart = PieChart::new("t").with_slice("a", 2).with_slice("b", 1);
        let bytes = chart.render_png(200, 200).unwrap();
        let rgb = image::load_from_memory(&bytes).unwrap().to_rgb8();

        assert_eq!(rgb.get_pixel(105, 60).0, PieChart::slice_color(0));
        assert_eq!(rgb.get_pixel(95, 60).0, PieChart::slice_color(1));
    }

    #[test]
    fn turn_fraction_starts_at_twelve_o_clock() {
        assert!(fraction_of_turn(0.0, -10.0).abs() < 1e-9);
        assert!((fraction_of_turn(10.0, 0.0) - 0.25).abs() < 1e-9);
        assert!((fraction_of_turn(0.0, 10.0) - 0.5).abs() < 1e-9);
        assert!((fraction_of_turn(-10.0, 0.0) - 0.75).abs() < 1e-9);
    }

    #[test]
    fn palette_cycles_past_its_length() {
        assert_eq!(PieChart::slice_color(0), PieChart::slice_color(8));
    }
}
