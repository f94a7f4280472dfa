use serde::{Deserialize, Serialize};

/// Millimetres to PDF points.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Placement of the laid-out surface on paper.
///
/// The surface is laid out in a reference window `window_width` units wide and then
/// scaled so that it spans `content_width_mm` on the page, starting `margin_left_mm`
/// and `margin_top_mm` from the page edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_left_mm: f32,
    pub margin_top_mm: f32,
    pub content_width_mm: f32,
    /// Logical width of the source surface.
    pub window_width: f32,
}

/// A4 portrait, 10 mm margins, 190 mm content width, 650-unit window.
pub fn default_page_geometry() -> PageGeometry {
    PageGeometry {
        page_width_mm: 210.0,
        page_height_mm: 297.0,
        margin_left_mm: 10.0,
        margin_top_mm: 10.0,
        content_width_mm: 190.0,
        window_width: 650.0,
    }
}

impl PageGeometry {
    /// Millimetres per surface unit.
    pub fn scale(&self) -> f32 {
        self.content_width_mm / self.window_width
    }

    /// Printable height per page in millimetres. The bottom margin mirrors the top one.
    pub fn content_height_mm(&self) -> f32 {
        self.page_height_mm - 2.0 * self.margin_top_mm
    }

    /// Printable height per page expressed in surface units.
    pub fn page_height_units(&self) -> f32 {
        self.content_height_mm() / self.scale()
    }

    pub fn page_width_pt(&self) -> f32 {
        self.page_width_mm * PT_PER_MM
    }

    pub fn page_height_pt(&self) -> f32 {
        self.page_height_mm * PT_PER_MM
    }
}
