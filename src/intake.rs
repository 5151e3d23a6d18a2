//! Validation gate for extraction-collaborator records.
//!
//! The extraction step hands over candidate fixed blocks with no validity
//! guarantees. Everything that survives the gate is a well-formed
//! `FixedBlock`; everything else is returned with the error that blocked
//! it, so nothing is silently swallowed.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::block::FixedBlock;
use crate::error::{ScheduleError, ScheduleResult};
use crate::weekday::Weekday;

/// One candidate fixed block as produced by the extraction step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateBlock {
    pub label: String,
    /// Weekday tags, e.g. `["MO", "WE"]` or full names.
    pub days: Vec<String>,
    /// Time of day, `HH:MM` or `HH:MM:SS`.
    pub starts_at: String,
    pub ends_at: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub secondary_info: Option<String>,
}

#[derive(Debug)]
pub struct RejectedCandidate {
    pub label: String,
    pub reason: ScheduleError,
}

/// Outcome of admitting a batch of candidates.
#[derive(Debug, Default)]
pub struct Intake {
    pub admitted: Vec<FixedBlock>,
    pub rejected: Vec<RejectedCandidate>,
}

/// Parse a JSON array of candidate records.
pub fn parse_candidates(json: &str) -> ScheduleResult<Vec<CandidateBlock>> {
    serde_json::from_str(json).map_err(|e| ScheduleError::Serialization(e.to_string()))
}

/// Admit every valid candidate as a fixed block with a fresh id; pair each
/// invalid one with the error that blocked it. A fully malformed batch
/// admits nothing, which downstream expands and exports to an empty
/// result rather than a failure.
pub fn admit_candidates(candidates: Vec<CandidateBlock>, group_id: Option<&str>) -> Intake {
    let mut intake = Intake::default();
    for candidate in candidates {
        match admit_one(&candidate, group_id) {
            Ok(block) => intake.admitted.push(block),
            Err(reason) => intake.rejected.push(RejectedCandidate {
                label: candidate.label,
                reason,
            }),
        }
    }
    intake
}

fn admit_one(candidate: &CandidateBlock, group_id: Option<&str>) -> ScheduleResult<FixedBlock> {
    let days = candidate
        .days
        .iter()
        .map(|tag| Weekday::from_tag(tag))
        .collect::<ScheduleResult<Vec<_>>>()?;
    let daily_start = parse_time(&candidate.starts_at)?;
    let daily_end = parse_time(&candidate.ends_at)?;

    let mut block = FixedBlock::new(
        Uuid::new_v4().to_string(),
        candidate.label.clone(),
        days,
        daily_start,
        daily_end,
    )?;
    block.location = candidate.location.clone();
    block.secondary_info = candidate.secondary_info.clone();
    block.group_id = group_id.map(str::to_string);
    Ok(block)
}

/// Parse `HH:MM` or `HH:MM:SS`.
fn parse_time(s: &str) -> ScheduleResult<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| {
            ScheduleError::InvalidInterval(format!(
                "Invalid time-of-day '{}'. Expected HH:MM",
                s
            ))
        })
}
