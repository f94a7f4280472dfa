use std::sync::Arc;

use crate::config::Config;
use crate::export::{ArtifactSink, DirectorySink, ExportJobRegistry, ExportPipeline};
use crate::layout::PageGeometry;
use crate::store::SessionRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Page geometry used for both the preview surface and the exported PDF.
    pub geometry: PageGeometry,
    pub sessions: SessionRegistry,
    pub exports: ExportJobRegistry,
    pub pipeline: ExportPipeline,
    /// Optional extra destination for finished exports (EXPORT_DIR).
    pub sink: Option<Arc<dyn ArtifactSink>>,
}

impl AppState {
    pub fn new(config: &Config, geometry: PageGeometry) -> Self {
        let sink = config
            .export_dir
            .clone()
            .map(|dir| Arc::new(DirectorySink::new(dir)) as Arc<dyn ArtifactSink>);

        AppState {
            sessions: SessionRegistry::new(geometry.clone()),
            exports: ExportJobRegistry::new(),
            pipeline: ExportPipeline::new(geometry.clone()),
            geometry,
            sink,
        }
    }
}
