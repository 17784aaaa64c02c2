//! Sales distribution profile: day-of-week and intra-day weight curves.
//!
//! Both curves are validated when the profile is built. Shares that do
//! not sum to 1.0 are a configuration error; the profile never
//! renormalises on the caller's behalf.

use crate::{
    error::{EngineError, EngineResult},
    types::{hours_to_minutes, Minutes, Money, SHARE_TOLERANCE},
};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayType {
    pub day: Weekday,
    pub share_of_week_sales: f64,
}

impl DayType {
    /// Even split of the week across the first `days` weekdays from Monday.
    pub fn uniform_week(days: u8) -> Vec<DayType> {
        let share = 1.0 / f64::from(days.max(1));
        let mut day = Weekday::Mon;
        let mut out = Vec::with_capacity(days as usize);
        for _ in 0..days.min(7) {
            out.push(DayType { day, share_of_week_sales: share });
            day = day.succ();
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub label: String,
    pub duration_hours: f64,
    pub share_of_day_sales: f64,
}

impl TimeBlock {
    /// One-hour blocks starting at `open_hour`, labelled "07:00-08:00" etc.
    pub fn hourly(open_hour: u8, shares: &[f64]) -> Vec<TimeBlock> {
        shares
            .iter()
            .enumerate()
            .map(|(i, share)| {
                let start = (u32::from(open_hour) + i as u32) % 24;
                let end = (start + 1) % 24;
                TimeBlock {
                    label: format!("{start:02}:00-{end:02}:00"),
                    duration_hours: 1.0,
                    share_of_day_sales: *share,
                }
            })
            .collect()
    }

    pub fn duration_minutes(&self) -> Minutes {
        hours_to_minutes(self.duration_hours).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DistributionFile {
    pub(crate) day_types: Vec<DayType>,
    pub(crate) time_blocks: Vec<TimeBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalesDistributionProfile {
    day_types: Vec<DayType>,
    time_blocks: Vec<TimeBlock>,
}

impl SalesDistributionProfile {
    pub fn new(day_types: Vec<DayType>, time_blocks: Vec<TimeBlock>) -> EngineResult<Self> {
        if day_types.is_empty() || day_types.len() > 7 {
            return Err(EngineError::config(format!(
                "distribution needs 1..=7 day types, got {}",
                day_types.len()
            )));
        }
        for (i, d) in day_types.iter().enumerate() {
            check_share("day", &d.day.to_string(), d.share_of_week_sales)?;
            if day_types[..i].iter().any(|prev| prev.day == d.day) {
                return Err(EngineError::config(format!("day {} listed twice", d.day)));
            }
        }
        check_sum("day-of-week", day_types.iter().map(|d| d.share_of_week_sales))?;

        if time_blocks.is_empty() {
            return Err(EngineError::config("distribution has no time blocks"));
        }
        for b in &time_blocks {
            check_share("time block", &b.label, b.share_of_day_sales)?;
            match hours_to_minutes(b.duration_hours) {
                Some(m) if m > 0 => {}
                _ => {
                    return Err(EngineError::config(format!(
                        "time block {} duration {}h must be a positive whole number of minutes",
                        b.label, b.duration_hours
                    )))
                }
            }
        }
        check_sum("intra-day", time_blocks.iter().map(|b| b.share_of_day_sales))?;

        Ok(Self { day_types, time_blocks })
    }

    pub fn day_types(&self) -> &[DayType] {
        &self.day_types
    }

    pub fn time_blocks(&self) -> &[TimeBlock] {
        &self.time_blocks
    }

    /// Total hours covered by the time blocks of one day.
    pub fn open_hours(&self) -> f64 {
        self.time_blocks.iter().map(|b| b.duration_hours).sum()
    }

    pub fn daily_sales(&self, weekly_sales: Money, day: &DayType) -> Money {
        weekly_sales * day.share_of_week_sales
    }

    pub fn time_block_sales(&self, daily_sales: Money, block: &TimeBlock) -> Money {
        daily_sales * block.share_of_day_sales
    }

    /// Whether this profile covers `days_open_per_week` days of
    /// `span_hours` each.
    pub fn covers(&self, days_open_per_week: u8, span_hours: f64) -> bool {
        self.day_types.len() == days_open_per_week as usize
            && (self.open_hours() - span_hours).abs() <= SHARE_TOLERANCE
    }

    /// Profile for a run's operating week. Curves that already fit are kept;
    /// a day curve of the wrong length is replaced by an even split from
    /// Monday, and blocks that do not fill the span by even one-hour blocks
    /// from `open_hour`. The result is validated like any other profile.
    pub fn for_operating_week(
        &self,
        days_open_per_week: u8,
        open_hour: u8,
        span_hours: u8,
    ) -> EngineResult<Cow<'_, Self>> {
        if self.covers(days_open_per_week, f64::from(span_hours)) {
            return Ok(Cow::Borrowed(self));
        }

        let day_types = if self.day_types.len() == days_open_per_week as usize {
            self.day_types.clone()
        } else {
            log::info!(
                "distribution covers {} days, store opens {days_open_per_week}: using an even day split",
                self.day_types.len()
            );
            DayType::uniform_week(days_open_per_week)
        };

        let time_blocks = if (self.open_hours() - f64::from(span_hours)).abs() <= SHARE_TOLERANCE {
            self.time_blocks.clone()
        } else {
            log::info!(
                "time blocks cover {}h, store opens {span_hours}h from {open_hour:02}:00: using even hourly blocks",
                self.open_hours()
            );
            let share = 1.0 / f64::from(span_hours.max(1));
            TimeBlock::hourly(open_hour, &vec![share; span_hours as usize])
        };

        Self::new(day_types, time_blocks).map(Cow::Owned)
    }
}

impl Default for SalesDistributionProfile {
    fn default() -> Self {
        let day_shares = [0.14, 0.15, 0.16, 0.16, 0.17, 0.22];
        let day_types = DayType::uniform_week(6)
            .into_iter()
            .zip(day_shares)
            .map(|(d, share)| DayType { share_of_week_sales: share, ..d })
            .collect();
        let time_blocks =
            TimeBlock::hourly(7, &[0.20, 0.20, 0.10, 0.075, 0.075, 0.05, 0.10, 0.10, 0.05, 0.05]);
        Self { day_types, time_blocks }
    }
}

fn check_share(kind: &str, label: &str, share: f64) -> EngineResult<()> {
    if !share.is_finite() || share <= 0.0 || share > 1.0 {
        return Err(EngineError::config(format!(
            "{kind} {label} share {share} outside (0, 1]"
        )));
    }
    Ok(())
}

fn check_sum(curve: &str, shares: impl Iterator<Item = f64>) -> EngineResult<()> {
    let total: f64 = shares.sum();
    if (total - 1.0).abs() > SHARE_TOLERANCE {
        return Err(EngineError::config(format!(
            "{curve} shares sum to {total}, expected 1.0"
        )));
    }
    Ok(())
}
