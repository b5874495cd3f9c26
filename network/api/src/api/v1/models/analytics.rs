use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::database::LikeAnalytics;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive range of whole UTC days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsQuery {
	pub date_from: NaiveDate,
	pub date_to: NaiveDate,
}

impl AnalyticsQuery {
	/// Both dates are required and must be `YYYY-MM-DD`.
	pub fn parse(date_from: Option<&str>, date_to: Option<&str>) -> Option<Self> {
		Some(Self {
			date_from: parse_date(date_from?)?,
			date_to: parse_date(date_to?)?,
		})
	}

	/// The half open time range covering both days completely.
	pub fn range(&self) -> (DateTime<Utc>, DateTime<Utc>) {
		let from = self.date_from.and_time(NaiveTime::MIN).and_utc();
		let to = self
			.date_to
			.succ_opt()
			.map(|day| day.and_time(NaiveTime::MIN).and_utc())
			.unwrap_or(DateTime::<Utc>::MAX_UTC);

		(from, to)
	}
}

// chrono skips whitespace in front of numeric fields, the value must be the date alone.
fn parse_date(s: &str) -> Option<NaiveDate> {
	if s.chars().any(char::is_whitespace) {
		return None;
	}

	NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AnalyticsEntry {
	pub date: NaiveDate,
	pub likes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AnalyticsResponse {
	pub analitics: Vec<AnalyticsEntry>,
}

impl From<Vec<LikeAnalytics>> for AnalyticsResponse {
	fn from(rows: Vec<LikeAnalytics>) -> Self {
		Self {
			analitics: rows
				.into_iter()
				.map(|row| AnalyticsEntry {
					date: row.date,
					likes: row.likes,
				})
				.collect(),
		}
	}
}
