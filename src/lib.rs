pub mod api;
pub mod boxes;
pub mod known_boxes;
pub mod parser;
pub mod render;
pub mod walker;

pub use api::{collect_events, probe_file};
pub use boxes::{BoxEvent, BoxHeader, FourCC, Mp4Box};
pub use parser::{ParseError, ReadOutcome, read_box};
pub use walker::{BoxSink, ProbeStats, probe, walk};
