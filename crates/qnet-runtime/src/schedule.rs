//! Schedule compiler: turns ordered segments into a timed highlight list.
//!
//! A single pass walks the segments with a running cursor. Ordinary hops
//! (success or failed generation) are narrated one after another. A run of
//! consecutive failed-swap hops is presented as one synchronized event: a
//! settle delay is charged once before the run, every hop in the run lights
//! up at the same offset, and the run as a whole advances the cursor once.
//!
//! The compiler is a pure function; it never fails and holds no state once
//! the schedule is returned.

use qnet_core::highlight::{HighlightColor, HighlightInstruction, Schedule};
use qnet_core::segment::{OutcomeKind, Segment};
use serde::{Deserialize, Serialize};

/// Timing constants, in milliseconds.
///
/// The defaults are the pacing the renderer is tuned for and must be kept
/// bit-for-bit for reproducible schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleTiming {
    /// Charged once before each run of failed-swap hops.
    pub settle_delay_ms: u64,
    /// Charged once after each run of failed-swap hops.
    pub group_duration_ms: u64,
    /// Charged after each success or failed-generation hop.
    pub step_ms: u64,
    /// Gap between a `set` and the start of its fade.
    pub fade_delay_ms: u64,
    /// Length of the fade back to neutral.
    pub fade_duration_ms: u64,
}

impl Default for ScheduleTiming {
    fn default() -> Self {
        Self {
            settle_delay_ms: 1000,
            group_duration_ms: 2000,
            step_ms: 700,
            fade_delay_ms: 1000,
            fade_duration_ms: 2500,
        }
    }
}

/// Compiles segments into highlight schedules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleCompiler {
    timing: ScheduleTiming,
}

impl ScheduleCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timing(timing: ScheduleTiming) -> Self {
        Self { timing }
    }

    pub fn timing(&self) -> &ScheduleTiming {
        &self.timing
    }

    pub fn compile(&self, segments: &[Segment]) -> Schedule {
        let timing = &self.timing;
        let mut instructions = Vec::with_capacity(segments.len() * 2);
        let mut t: u64 = 0;
        let mut i = 0;

        while i < segments.len() {
            if segments[i].is_failed_swap() {
                if i == 0 || !segments[i - 1].is_failed_swap() {
                    t = t.saturating_add(timing.settle_delay_ms);
                }

                let mut j = i;
                while j < segments.len() && segments[j].is_failed_swap() {
                    self.emit(&mut instructions, &segments[j], HighlightColor::Failure, t);
                    j += 1;
                }

                t = t.saturating_add(timing.group_duration_ms);
                i = j;
            } else {
                let color = match segments[i].kind {
                    OutcomeKind::Success => HighlightColor::Success,
                    _ => HighlightColor::Failure,
                };
                self.emit(&mut instructions, &segments[i], color, t);
                t = t.saturating_add(timing.step_ms);
                i += 1;
            }
        }

        Schedule::new(instructions)
    }

    fn emit(
        &self,
        out: &mut Vec<HighlightInstruction>,
        segment: &Segment,
        color: HighlightColor,
        t: u64,
    ) {
        out.push(HighlightInstruction::set(
            segment.from.clone(),
            segment.to.clone(),
            color,
            t,
        ));
        out.push(HighlightInstruction::fade(
            segment.from.clone(),
            segment.to.clone(),
            t.saturating_add(self.timing.fade_delay_ms),
            self.timing.fade_duration_ms,
        ));
    }
}

/// Compile with the default timing.
pub fn compile(segments: &[Segment]) -> Schedule {
    ScheduleCompiler::new().compile(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qnet_core::highlight::HighlightAction;

    fn sets(schedule: &Schedule) -> Vec<(String, String, HighlightColor, u64)> {
        schedule
            .instructions()
            .iter()
            .filter(|i| i.action == HighlightAction::Set)
            .map(|i| (i.from.to_string(), i.to.to_string(), i.color, i.start_offset_ms))
            .collect()
    }

    #[test]
    fn empty_input_gives_empty_schedule() {
        let schedule = compile(&[]);
        assert!(schedule.is_empty());
        assert_eq!(schedule.total_duration_ms(), 0);
    }

    #[test]
    fn failed_swap_group_then_success() {
        let segments = vec![
            Segment::failed_swap("A", "B"),
            Segment::failed_swap("B", "C"),
            Segment::success("C", "D"),
        ];
        let schedule = compile(&segments);

        assert_eq!(
            sets(&schedule),
            vec![
                ("A".to_string(), "B".to_string(), HighlightColor::Failure, 1000),
                ("B".to_string(), "C".to_string(), HighlightColor::Failure, 1000),
                ("C".to_string(), "D".to_string(), HighlightColor::Success, 3000),
            ]
        );
    }

    #[test]
    fn every_set_is_followed_by_its_fade() {
        let segments = vec![
            Segment::success("A", "B"),
            Segment::failed_swap("B", "C"),
            Segment::failed_generation("C", "D"),
        ];
        let schedule = compile(&segments);
        let ins = schedule.instructions();
        assert_eq!(ins.len(), 6);

        for pair in ins.chunks(2) {
            let (set, fade) = (&pair[0], &pair[1]);
            assert_eq!(set.action, HighlightAction::Set);
            assert_eq!(set.fade_duration_ms, 0);
            assert_eq!(fade.action, HighlightAction::FadeToNeutral);
            assert_eq!(fade.color, HighlightColor::Neutral);
            assert_eq!(fade.start_offset_ms, set.start_offset_ms + 1000);
            assert_eq!(fade.fade_duration_ms, 2500);
            assert_eq!((&set.from, &set.to), (&fade.from, &fade.to));
        }
    }

    #[test]
    fn singles_advance_by_step() {
        let segments = vec![
            Segment::success("A", "B"),
            Segment::failed_generation("B", "C"),
            Segment::success("C", "D"),
        ];
        let offsets: Vec<u64> = sets(&compile(&segments)).into_iter().map(|s| s.3).collect();
        assert_eq!(offsets, vec![0, 700, 1400]);
        assert_eq!(sets(&compile(&segments))[1].2, HighlightColor::Failure);
    }

    #[test]
    fn separate_failed_runs_each_pay_settle_delay() {
        let segments = vec![
            Segment::failed_swap("A", "B"),
            Segment::success("B", "C"),
            Segment::failed_swap("C", "D"),
            Segment::failed_swap("D", "E"),
            Segment::success("E", "F"),
        ];
        let offsets: Vec<u64> = sets(&compile(&segments)).into_iter().map(|s| s.3).collect();
        // 1000 settle, run at 1000, +2000 -> 3000 success, +700 -> 3700,
        // +1000 settle -> run at 4700, +2000 -> 6700 success
        assert_eq!(offsets, vec![1000, 3000, 4700, 4700, 6700]);
    }

    #[test]
    fn duplicate_hops_are_tolerated() {
        let segments = vec![
            Segment::failed_swap("B", "C"),
            Segment::failed_swap("B", "C"),
        ];
        let schedule = compile(&segments);
        assert_eq!(schedule.len(), 4);
        assert_eq!(schedule.total_duration_ms(), 1000 + 1000 + 2500);
    }

    #[test]
    fn custom_timing_is_applied() {
        let compiler = ScheduleCompiler::with_timing(ScheduleTiming {
            settle_delay_ms: 10,
            group_duration_ms: 20,
            step_ms: 7,
            fade_delay_ms: 1,
            fade_duration_ms: 5,
        });
        let schedule = compiler.compile(&[Segment::failed_swap("A", "B"), Segment::success("B", "C")]);
        let offsets: Vec<u64> = schedule.instructions().iter().map(|i| i.start_offset_ms).collect();
        assert_eq!(offsets, vec![10, 11, 30, 31]);
    }

    #[test]
    fn huge_timing_values_saturate() {
        let compiler = ScheduleCompiler::with_timing(ScheduleTiming {
            settle_delay_ms: u64::MAX,
            group_duration_ms: u64::MAX,
            step_ms: u64::MAX,
            fade_delay_ms: u64::MAX,
            fade_duration_ms: u64::MAX,
        });
        let schedule = compiler.compile(&[
            Segment::success("A", "B"),
            Segment::failed_swap("A", "B"),
            Segment::success("B", "C"),
        ]);

        assert_eq!(schedule.len(), 6);
        assert!(schedule.instructions().iter().skip(1).all(|i| i.start_offset_ms == u64::MAX));
        assert_eq!(schedule.total_duration_ms(), u64::MAX);
    }
}
