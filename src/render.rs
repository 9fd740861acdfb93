use crate::boxes::BoxEvent;
use crate::known_boxes::KnownBox;
use serde::Serialize;

/// `[type] size=N`, indented with one tab per nesting level.
pub fn text_line(e: &BoxEvent) -> String {
    format!("{}[{}] size={}", "\t".repeat(e.depth), e.typ, e.size)
}

/// JSON view of an event, with the raw tag bytes alongside the lossy text.
#[derive(Debug, Serialize)]
pub struct JsonEvent {
    #[serde(flatten)]
    pub event: BoxEvent,
    pub type_hex: String,
    pub name: Option<&'static str>,
}

impl From<&BoxEvent> for JsonEvent {
    fn from(e: &BoxEvent) -> Self {
        let kb = KnownBox::from(e.typ);
        JsonEvent {
            event: *e,
            type_hex: e.typ.to_hex(),
            name: kb.is_known().then(|| kb.full_name()),
        }
    }
}

pub fn json_line(e: &BoxEvent) -> serde_json::Result<String> {
    serde_json::to_string(&JsonEvent::from(e))
}
