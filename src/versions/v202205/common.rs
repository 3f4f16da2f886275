use chrono::{NaiveDate, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Date {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl Date {
    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DateTime {
    pub date: Date,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub time_zone_id: String,
}

impl DateTime {
    pub fn to_chrono(&self) -> Option<chrono::DateTime<Tz>> {
        let zone: Tz = self.time_zone_id.parse().ok()?;
        let naive = self.date.to_naive()?.and_hms_opt(self.hour, self.minute, self.second)?;
        zone.from_local_datetime(&naive).single()
    }
}
