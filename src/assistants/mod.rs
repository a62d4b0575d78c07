//! Assistant workflow demo data.
//!
//! Static step records and their presentation metadata, consumed by the UI
//! layer. The `ivy_says` narratives are what the typewriter usually reveals.

mod step_type;
mod steps;

pub use step_type::{step_type_meta, StepType, StepTypeMeta};
pub use steps::{
    builder_node_templates, sidebar_step_map, step, step_definitions, BuilderNode, SidebarStep,
    StepComment, StepDefinition, StepRow, StepSource, MOCK_STEP_COUNT, SOURCE_OPTIONS,
};
