//! Static Chart Renderer
//! Renders trend charts to PNG with plotters, for export outside the GUI.
//!
//! Layout:
//! 1. Caption centered at the top
//! 2. Year on the X axis, value on the Y axis, light mesh
//! 3. One colored line per series (with point markers for country charts)
//! 4. Legend box in the upper right

use crate::charts::plotter::PALETTE_RGB;
use crate::charts::ChartData;
use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::prelude::*;
use std::fmt::Display;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Chart '{0}' has no data points")]
    Empty(String),
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render a chart into PNG bytes.
    pub fn render_png(chart: &ChartData, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        let ((x_min, x_max), (y_min, y_max)) = chart
            .bounds()
            .ok_or_else(|| RenderError::Empty(chart.title.clone()))?;

        let mut buffer = vec![0u8; (width as usize) * (height as usize) * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_error)?;

            let mut ctx = ChartBuilder::on(&root)
                .caption(&chart.title, ("sans-serif", 24))
                .margin(20)
                .x_label_area_size(45)
                .y_label_area_size(65)
                .build_cartesian_2d(x_min..x_max, y_min..y_max)
                .map_err(draw_error)?;

            ctx.configure_mesh()
                .x_desc("Year")
                .y_desc(&chart.y_label)
                .x_label_formatter(&|x| format!("{:.0}", x))
                .light_line_style(RGBColor(235, 235, 235))
                .draw()
                .map_err(draw_error)?;

            for (idx, series) in chart.series.iter().enumerate() {
                if series.points.is_empty() {
                    continue;
                }
                let color = series_color(idx);
                let points = series.points.iter().map(|p| (p[0], p[1]));

                ctx.draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
                    .map_err(draw_error)?
                    .label(series.name.as_str())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                    });

                if chart.markers {
                    ctx.draw_series(points.map(|p| Circle::new(p, 3, color.filled())))
                        .map_err(draw_error)?;
                }
            }

            ctx.configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.85))
                .border_style(BLACK)
                .draw()
                .map_err(draw_error)?;

            root.present().map_err(draw_error)?;
        }

        let image = RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| RenderError::Draw("pixel buffer size mismatch".to_string()))?;
        let mut png = Vec::new();
        DynamicImage::ImageRgb8(image).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(png)
    }

    /// Render a chart and write it to `path`.
    pub fn save_png(
        chart: &ChartData,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let png = Self::render_png(chart, width, height)?;
        std::fs::write(path, png).map_err(|source| RenderError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

fn series_color(index: usize) -> RGBColor {
    let (r, g, b) = PALETTE_RGB[index % PALETTE_RGB.len()];
    RGBColor(r, g, b)
}

fn draw_error<E: Display>(err: E) -> RenderError {
    RenderError::Draw(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_chart_is_rejected() {
        let chart = ChartData::regional_trends(&[]);
        let err = StaticChartRenderer::render_png(&chart, 640, 480).unwrap_err();
        assert!(matches!(err, RenderError::Empty(_)));
    }

    #[test]
    fn palette_wraps_around() {
        let first = series_color(0);
        let wrapped = series_color(PALETTE_RGB.len());
        assert_eq!((first.0, first.1, first.2), (wrapped.0, wrapped.1, wrapped.2));
    }
}
