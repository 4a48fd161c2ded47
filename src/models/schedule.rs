use serde::{Deserialize, Serialize};

/// One weekday of the doctor's working hours
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct ScheduleDay {
    pub day: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    /// Slot length in minutes
    #[serde(default)]
    pub interval: Option<u32>,
}

impl ScheduleDay {
    pub fn working(day: &str, start: &str, end: &str, interval: u32) -> Self {
        Self {
            day: day.to_string(),
            start_time: Some(start.to_string()),
            end_time: Some(end.to_string()),
            interval: Some(interval),
        }
    }

    pub fn day_off(day: &str) -> Self {
        Self {
            day: day.to_string(),
            start_time: None,
            end_time: None,
            interval: None,
        }
    }

    /// Same rule the backend applies when saving a day
    pub fn is_day_off(&self) -> bool {
        match (self.start_time.as_deref(), self.end_time.as_deref()) {
            (Some(start), Some(end)) => start.trim() == end.trim(),
            _ => true,
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct SlotDetail {
    pub time: String,
    #[serde(default)]
    pub is_booked: bool,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct AvailableSlots {
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub slots: Vec<String>,
    #[serde(default)]
    pub slot_details: Vec<SlotDetail>,
}

impl AvailableSlots {
    /// Free times; older backends only send `slots`
    pub fn free(&self) -> Vec<&str> {
        if self.slot_details.is_empty() {
            return self.slots.iter().map(String::as_str).collect();
        }
        self.slot_details
            .iter()
            .filter(|slot| !slot.is_booked)
            .map(|slot| slot.time.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_off_rules() {
        assert!(ScheduleDay::day_off("Sunday").is_day_off());
        assert!(ScheduleDay::working("Friday", "09:00", "09:00", 30).is_day_off());
        assert!(ScheduleDay::working("Friday", "00:00", "00:00", 30).is_day_off());
        assert!(!ScheduleDay::working("Monday", "08:00", "16:00", 20).is_day_off());
    }

    #[test]
    fn free_slots_skip_booked_times() {
        let json = r#"{"day":"Monday","slots":["09:00","09:30"],
            "slot_details":[{"time":"09:00","is_booked":true},{"time":"09:30","is_booked":false}]}"#;
        let slots: AvailableSlots = serde_json::from_str(json).unwrap();
        assert_eq!(slots.free(), vec!["09:30"]);

        let legacy: AvailableSlots = serde_json::from_str(r#"{"slots":["10:00"]}"#).unwrap();
        assert_eq!(legacy.free(), vec!["10:00"]);
    }
}
