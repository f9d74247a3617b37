use chrono::{DateTime, FixedOffset, NaiveDate};

/// Output point: position, interpolated time and (optionally) elevation in meters
#[derive(Debug, Clone, PartialEq)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
    pub time: DateTime<FixedOffset>,
}

/// Output sub-segment built from exactly one input [`Segment`](crate::Segment)
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSegment {
    pub kind: String,
    pub source_service: String,
    pub points: Vec<TrackPoint>,
}

/// The track for one calendar day
#[derive(Debug, Clone, PartialEq)]
pub struct DayTrack {
    pub day: NaiveDate,
    pub segments: Vec<TrackSegment>,
}

impl DayTrack {
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day,
            segments: Vec::new(),
        }
    }

    /// `YYYYMMDD` key used for the track name and the output file name
    pub fn day_key(&self) -> String {
        format_day_key(self.day)
    }

    pub fn name(&self) -> String {
        format!("Gyroscope path: {}", self.day_key())
    }

    pub fn point_count(&self) -> usize {
        self.segments.iter().map(|s| s.points.len()).sum()
    }

    pub fn points_mut(&mut self) -> impl Iterator<Item = &mut TrackPoint> {
        self.segments.iter_mut().flat_map(|s| s.points.iter_mut())
    }
}

/// Format a date as `YYYYMMDD`
pub fn format_day_key(day: NaiveDate) -> String {
    day.format("%Y%m%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_key_and_name() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let track = DayTrack::new(day);
        assert_eq!(track.day_key(), "20240105");
        assert_eq!(track.name(), "Gyroscope path: 20240105");
        assert_eq!(track.point_count(), 0);
    }
}
