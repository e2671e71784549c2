pub mod category;
pub mod media;
pub mod node;
pub mod roadmap;
pub mod video;

pub use category::{Category, TripDescriptor};
pub use media::{MapResource, MediaResource, SearchLink, VideoResource};
pub use node::{NodeResources, PhaseNode, RoadmapNode, Side, StepNode};
pub use roadmap::{Phase, PhaseSource, Roadmap, RoadmapRequest, Step};
pub use video::{PipelineRunResult, RankedVideo, SourceTier};
