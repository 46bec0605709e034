//! Custom `genpdf` elements and decorators used by the report composer.
//!
//! The upstream crate ships no horizontal rule, no cell shading and no
//! width-constrained image loading, so the small pieces the reports need are
//! implemented here on top of the `genpdf` render primitives.

use genpdf::elements::{CellDecorator, Image};
use genpdf::style::{Color, Style};
use genpdf::{render, Context, Element, Mm, Position, RenderResult, Scale, Size};
use image::GenericImageView;

use crate::error::ReportError;

const DEFAULT_IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;
const DIVIDER_PADDING_MM: f64 = 2.0;
const RULE_ALLOWANCE_MM: f64 = 0.5;
const HEADER_BAND_MM: f64 = 4.5;
const HEADER_STROKE_STEP_MM: f64 = 0.3;
const HEADER_SHADE: Color = Color::Greyscale(211);

fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

/// A horizontal rule spanning the full content width, with vertical padding
/// on both sides.  Used as the section separator throughout the reports.
pub struct Divider {
    padding: Mm,
}

impl Divider {
    /// Creates a divider with the default padding.
    pub fn new() -> Self {
        Self {
            padding: mm_from_f64(DIVIDER_PADDING_MM),
        }
    }

    /// Sets the vertical padding and returns the updated divider.
    pub fn with_padding(mut self, padding: impl Into<Mm>) -> Self {
        self.padding = padding.into();
        self
    }
}

impl Default for Divider {
    fn default() -> Self {
        Self::new()
    }
}

impl Element for Divider {
    fn render(
        &mut self,
        _context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, genpdf::error::Error> {
        let height = self.padding + self.padding + mm_from_f64(RULE_ALLOWANCE_MM);

        let mut result = RenderResult::default();
        if height > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        let width = area.size().width;
        let mut line_style = Style::new();
        if let Some(color) = style.color() {
            line_style = line_style.with_color(color);
        }
        area.draw_line(
            vec![
                Position::new(0, self.padding),
                Position::new(width, self.padding),
            ],
            line_style,
        );

        result.size = Size::new(width, height);
        Ok(result)
    }
}

/// Cell decorator that shades the header row light gray and draws no borders.
///
/// The shading is painted in `prepare_cell`, before the cell content, as a
/// band of closely spaced horizontal strokes; with the default stroke width
/// the strokes overlap into a solid fill.
pub struct ShadedRowDecorator {
    band_height: Mm,
}

impl ShadedRowDecorator {
    /// Creates a decorator shading the first row with the default band height.
    pub fn new() -> Self {
        Self {
            band_height: mm_from_f64(HEADER_BAND_MM),
        }
    }
}

impl Default for ShadedRowDecorator {
    fn default() -> Self {
        Self::new()
    }
}

impl CellDecorator for ShadedRowDecorator {
    fn prepare_cell<'p>(
        &self,
        _column: usize,
        row: usize,
        area: render::Area<'p>,
    ) -> render::Area<'p> {
        if row == 0 {
            let width = area.size().width;
            let mut band = self.band_height;
            if band > area.size().height {
                band = area.size().height;
            }

            let shade = Style::new().with_color(HEADER_SHADE);
            let step = mm_from_f64(HEADER_STROKE_STEP_MM);
            let mut offset = mm_from_f64(0.0);
            while offset < band {
                area.draw_line(
                    vec![Position::new(0, offset), Position::new(width, offset)],
                    shade,
                );
                offset += step;
            }
        }
        area
    }

    fn decorate_cell(
        &mut self,
        _column: usize,
        _row: usize,
        _has_more: bool,
        _area: render::Area<'_>,
        row_height: Mm,
    ) -> Mm {
        row_height
    }
}

fn estimated_width_mm(image: &image::DynamicImage, dpi: f64) -> f64 {
    let (px_width, _) = image.dimensions();
    MM_PER_INCH * f64::from(px_width) / dpi
}

/// Decodes raw image bytes into a `genpdf` image scaled to the requested
/// width in millimetres, preserving the aspect ratio.
pub fn scaled_image_from_bytes(
    bytes: impl AsRef<[u8]>,
    width_mm: f64,
) -> Result<Image, ReportError> {
    let dynamic = image::load_from_memory(bytes.as_ref())?;
    let natural_width = estimated_width_mm(&dynamic, DEFAULT_IMAGE_DPI);
    let mut image = Image::from_dynamic_image(dynamic)?;
    if natural_width > f64::EPSILON {
        let scale = width_mm / natural_width;
        image.set_scale(Scale::new(scale, scale));
    }
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::{estimated_width_mm, scaled_image_from_bytes};
    use crate::error::ReportError;

    fn png_fixture(width: u32, height: u32) -> Vec<u8> {
        let buffer = image::ImageBuffer::from_pixel(width, height, image::Rgb([10u8, 20, 30]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(buffer)
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageOutputFormat::Png,
            )
            .expect("encode fixture png");
        bytes
    }

    #[test]
    fn image_width_estimate_follows_dpi() {
        let bytes = png_fixture(300, 150);
        let dynamic = image::load_from_memory(&bytes).expect("decode fixture");
        let width = estimated_width_mm(&dynamic, 300.0);
        assert!((width - 25.4).abs() < 1e-9);
    }

    #[test]
    fn scaled_image_accepts_valid_png() {
        let bytes = png_fixture(64, 64);
        assert!(scaled_image_from_bytes(&bytes, 100.0).is_ok());
    }

    #[test]
    fn scaled_image_rejects_garbage_bytes() {
        let err = scaled_image_from_bytes(b"not an image", 100.0).err().unwrap();
        assert!(matches!(err, ReportError::Encoding(_)));
    }
}
