//! Highlight instructions and the schedules built from them.
//!
//! A schedule is static data: every instruction carries a start offset
//! relative to the moment playback begins. Executing it against a live
//! display is the renderer's job.

use crate::types::NodeId;
use serde::{Deserialize, Serialize};

/// Stroke color a segment is set to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HighlightColor {
    #[serde(rename = "highlight-success")]
    Success,
    #[serde(rename = "highlight-failure")]
    Failure,
    #[serde(rename = "neutral")]
    Neutral,
}

impl HighlightColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            HighlightColor::Success => "highlight-success",
            HighlightColor::Failure => "highlight-failure",
            HighlightColor::Neutral => "neutral",
        }
    }
}

/// What the renderer does at the instruction's offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightAction {
    /// Switch the stroke immediately.
    Set,
    /// Transition back to the neutral stroke over `fade_duration_ms`.
    FadeToNeutral,
}

/// A timed directive for one segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightInstruction {
    pub from: NodeId,
    pub to: NodeId,
    pub color: HighlightColor,
    pub start_offset_ms: u64,
    pub action: HighlightAction,
    pub fade_duration_ms: u64,
}

impl HighlightInstruction {
    pub fn set(from: NodeId, to: NodeId, color: HighlightColor, start_offset_ms: u64) -> Self {
        Self {
            from,
            to,
            color,
            start_offset_ms,
            action: HighlightAction::Set,
            fade_duration_ms: 0,
        }
    }

    pub fn fade(from: NodeId, to: NodeId, start_offset_ms: u64, fade_duration_ms: u64) -> Self {
        Self {
            from,
            to,
            color: HighlightColor::Neutral,
            start_offset_ms,
            action: HighlightAction::FadeToNeutral,
            fade_duration_ms,
        }
    }

    /// Offset at which this instruction's effect is complete.
    pub fn end_offset_ms(&self) -> u64 {
        self.start_offset_ms.saturating_add(self.fade_duration_ms)
    }

    /// Whether this instruction targets the undirected hop `{a, b}`.
    pub fn targets(&self, a: &NodeId, b: &NodeId) -> bool {
        (&self.from == a && &self.to == b) || (&self.from == b && &self.to == a)
    }
}

/// An ordered, immutable list of highlight instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    instructions: Vec<HighlightInstruction>,
}

impl Schedule {
    pub fn new(instructions: Vec<HighlightInstruction>) -> Self {
        Self { instructions }
    }

    pub fn instructions(&self) -> &[HighlightInstruction] {
        &self.instructions
    }

    pub fn into_instructions(self) -> Vec<HighlightInstruction> {
        self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Latest offset at which any instruction is still in effect.
    pub fn total_duration_ms(&self) -> u64 {
        self.instructions
            .iter()
            .map(HighlightInstruction::end_offset_ms)
            .max()
            .unwrap_or(0)
    }

    /// Instructions ordered by start offset, emission order kept for ties.
    pub fn timeline(&self) -> Vec<&HighlightInstruction> {
        let mut ordered: Vec<&HighlightInstruction> = self.instructions.iter().collect();
        ordered.sort_by_key(|ins| ins.start_offset_ms);
        ordered
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a HighlightInstruction;
    type IntoIter = std::slice::Iter<'a, HighlightInstruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}
