// Export: paginate the mounted preview surface, serialize it to PDF off the async
// executor, and hand the artifact (resume.pdf) to the job registry and any
// configured sink.

pub mod handlers;
pub mod jobs;
pub mod pdf;
pub mod pipeline;
pub mod sink;

pub use jobs::ExportJobRegistry;
pub use pipeline::{ExportError, ExportPipeline, ExportedDocument};
pub use sink::{ArtifactSink, DirectorySink};
