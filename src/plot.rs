//! Footprints figure
//!
//! The footprints are drawn as 2D histograms stacked vertically below the
//! figure title, one panel per element.

use std::path::Path;

use plotters::{coord::Shift, prelude::*};

use crate::{
    footprint::Footprint,
    histogram::{HistogramError, BINS},
};

/// Figure title
pub const TITLE: &str = "Ray Density";
const TITLE_HEIGHT: u32 = 40;

#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    #[error("failed to draw the figure: {0}")]
    Drawing(String),
    #[error("failed to bin the footprint")]
    Histogram(#[from] HistogramError),
}
impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for PlotError {
    fn from(value: DrawingAreaErrorKind<E>) -> Self {
        PlotError::Drawing(value.to_string())
    }
}
type Result<T> = std::result::Result<T, PlotError>;

/// Figure with one footprint panel per element
#[derive(Debug, Clone)]
pub struct Figure {
    footprints: Vec<Footprint>,
    bins: usize,
    panel_size: (u32, u32),
}
impl Figure {
    pub fn new(footprints: Vec<Footprint>) -> Self {
        Self {
            footprints,
            bins: BINS,
            panel_size: (800, 400),
        }
    }
    /// Sets the number of histogram bins along each axis
    pub fn bins(self, bins: usize) -> Self {
        Self { bins, ..self }
    }
    /// Sets the size in pixels of each panel
    pub fn panel_size(self, panel_size: (u32, u32)) -> Self {
        Self { panel_size, ..self }
    }
    pub fn footprints(&self) -> &[Footprint] {
        &self.footprints
    }
    pub fn panel_titles(&self) -> Vec<String> {
        self.footprints.iter().map(|f| f.title()).collect()
    }
    /// Figure size in pixels
    pub fn size(&self) -> (u32, u32) {
        let (width, height) = self.panel_size;
        let n = self.footprints.len().max(1) as u32;
        (width, TITLE_HEIGHT + n * height)
    }
    /// Draws the figure on the drawing area
    pub fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        root.fill(&WHITE)?;
        let root = root.titled(TITLE, ("sans-serif", 24))?;
        if self.footprints.is_empty() {
            log::warn!("no ray has hit any element");
            return Ok(());
        }
        let panels = root.split_evenly((self.footprints.len(), 1));
        for (footprint, panel) in self.footprints.iter().zip(panels.iter()) {
            draw_footprint(footprint, panel, self.bins)?;
        }
        Ok(())
    }
    /// Saves the figure to a SVG file if the extension is "svg" or to a bitmap file otherwise
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let size = self.size();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("svg") => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                self.draw(&root)?;
                root.present()?;
            }
            _ => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                self.draw(&root)?;
                root.present()?;
            }
        }
        log::info!("Figure saved to {:?}", path);
        Ok(())
    }
    /// Renders the figure as a SVG document
    pub fn to_svg(&self) -> Result<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, self.size()).into_drawing_area();
            self.draw(&root)?;
            root.present()?;
        }
        Ok(svg)
    }
    /// Renders the figure into a buffer of `0RGB` pixels, row by row
    pub fn to_rgb(&self) -> Result<Vec<u32>> {
        let (width, height) = self.size();
        let mut rgb = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut rgb, (width, height)).into_drawing_area();
            self.draw(&root)?;
            root.present()?;
        }
        Ok(rgb
            .chunks_exact(3)
            .map(|p| u32::from(p[0]) << 16 | u32::from(p[1]) << 8 | u32::from(p[2]))
            .collect())
    }
}

fn draw_footprint<DB: DrawingBackend>(
    footprint: &Footprint,
    area: &DrawingArea<DB, Shift>,
    bins: usize,
) -> Result<()> {
    let histogram = footprint.histogram(bins)?;
    let (x_min, x_max) = histogram.x_range();
    let (y_min, y_max) = histogram.y_range();
    let mut chart = ChartBuilder::on(area)
        .caption(footprint.title(), ("sans-serif", 18))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .margin(10)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(footprint.x_label())
        .y_desc(footprint.y_label())
        .draw()?;

    let cmap = colorous::VIRIDIS;
    let max_count = histogram.max_count().max(1) as f64;
    chart.draw_series(histogram.cells().map(|((x0, x1), (y0, y1), count)| {
        let c = cmap.eval_continuous(count as f64 / max_count);
        Rectangle::new([(x0, y0), (x1, y1)], RGBColor(c.r, c.g, c.b).filled())
    }))?;
    Ok(())
}
