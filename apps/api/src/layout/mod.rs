// Layout: turns a Document Tree into measured lines on a fixed-width surface and
// splits that surface into pages. Pure CPU work; async callers run it inside
// tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod geometry;
pub mod paginate;
pub mod surface;
pub mod wrap;

// Re-export the public API consumed by the session store and the exporter.
pub use font_metrics::FontFace;
pub use geometry::{default_page_geometry, PageGeometry};
pub use paginate::{paginate, PagePlan};
pub use surface::{render_surface, Surface};
