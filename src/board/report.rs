use super::{Board, Field, Footprint};
use serde::Serialize;
use uuid::Uuid;

/// What a footprint shows of its reference and value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FootprintReport {
    pub number: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lib_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_visible: Option<bool>,
}

impl From<Footprint<'_>> for FootprintReport {
    fn from(fp: Footprint<'_>) -> Self {
        let reference = fp.reference().ok();
        let value = fp.value().ok();
        Self {
            number: fp.number(),
            id: fp.id(),
            lib_id: fp.lib_id(),
            reference: reference.and_then(|f| f.text()),
            reference_visible: reference.as_ref().map(Field::is_visible),
            value: value.and_then(|f| f.text()),
            value_visible: value.as_ref().map(Field::is_visible),
        }
    }
}

pub fn report(board: &Board) -> Vec<FootprintReport> {
    board.footprints().map(FootprintReport::from).collect()
}
