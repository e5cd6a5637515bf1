use api_shared::dto::{CreateScheduleSlotReq, RecordId, UpdateScheduleSlotReq};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::domain::enums::Weekday;
use crate::error::ClinicResult;
use crate::schema::EntityKind;
use crate::validation;

const KIND: EntityKind = EntityKind::ScheduleSlot;

/// A recurring weekly availability window for a doctor, carved into
/// appointments of `slot_minutes` each. Storage only: no conflict
/// detection against booked appointments happens here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub doctor_id: RecordId,
    pub weekday: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_minutes: u16,
    pub active: bool,
}

impl ScheduleSlot {
    /// Builds a validated row from a create/replace request.
    pub fn from_request(req: &CreateScheduleSlotReq) -> ClinicResult<Self> {
        validation::ordered(KIND, "end_time", req.start_time, req.end_time)?;
        validation::positive(KIND, "slot_minutes", i64::from(req.slot_minutes))?;
        Ok(Self {
            doctor_id: req.doctor_id,
            weekday: validation::weekday(KIND, "weekday", req.weekday)?,
            start_time: req.start_time,
            end_time: req.end_time,
            slot_minutes: req.slot_minutes,
            active: req.active.unwrap_or(true),
        })
    }

    /// Applies a partial update; the time-window invariant is re-checked
    /// against the merged values.
    pub fn apply_update(&mut self, req: &UpdateScheduleSlotReq) -> ClinicResult<()> {
        if let Some(doctor_id) = req.doctor_id {
            self.doctor_id = doctor_id;
        }
        if let Some(weekday) = req.weekday {
            self.weekday = validation::weekday(KIND, "weekday", weekday)?;
        }
        if let Some(start_time) = req.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = req.end_time {
            self.end_time = end_time;
        }
        validation::ordered(KIND, "end_time", self.start_time, self.end_time)?;
        if let Some(slot_minutes) = req.slot_minutes {
            validation::positive(KIND, "slot_minutes", i64::from(slot_minutes))?;
            self.slot_minutes = slot_minutes;
        }
        if let Some(active) = req.active {
            self.active = active;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_must_have_positive_length() {
        let nine = NaiveTime::from_hms_opt(9, 0, 0).expect("valid time");
        let err = ScheduleSlot::from_request(&CreateScheduleSlotReq {
            doctor_id: 1,
            weekday: 2,
            start_time: nine,
            end_time: nine,
            slot_minutes: 20,
            active: None,
        })
        .expect_err("zero-length window");
        assert!(err.to_string().contains("end_time"));
    }

    #[test]
    fn weekday_code_is_validated() {
        let err = ScheduleSlot::from_request(&CreateScheduleSlotReq {
            doctor_id: 1,
            weekday: 8,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
            end_time: NaiveTime::from_hms_opt(13, 0, 0).expect("valid time"),
            slot_minutes: 20,
            active: None,
        })
        .expect_err("day 8 does not exist");
        assert!(err.to_string().contains("weekday"));
    }
}
