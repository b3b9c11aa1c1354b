//! Measured `(x, cost)` series, their JSON form, and spike filtering.
//!
//! On disk a series is a JSON array whose first element carries the description of
//! the measured algorithm and whose remaining elements are the points, in order:
//!
//! ```json
//! [{"info": "Breadth-first search [start=0]"}, {"x": 2.0, "y": 812.0}, {"x": 5.0, "y": 1430.0}]
//! ```

use std::{fs, path::Path};

use serde::{ser::SerializeSeq, Deserialize, Deserializer, Serialize, Serializer};

use crate::{utils::write_atomically, Result};

/// One measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Value of the complexity function for the iteration
    pub x: f64,
    /// Measured cost (nanoseconds for the default clock)
    pub y: f64,
}

/// Element of the on-disk array.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Entry {
    Info { info: String },
    Point { x: f64, y: f64 },
}

/// A described, ordered sequence of samples.
///
/// # Examples
///
/// ```rust
/// use graphlab::benchmark::SampleSeries;
///
/// let mut series = SampleSeries::new("Tarjan's SCC");
/// series.push(1.0, 120.0);
/// series.push(2.0, 250.0);
///
/// let json = series.to_json()?;
/// assert_eq!(json, r#"[{"info":"Tarjan's SCC"},{"x":1.0,"y":120.0},{"x":2.0,"y":250.0}]"#);
/// assert_eq!(graphlab::benchmark::SampleSeries::from_json(&json)?, series);
/// # Ok::<(), graphlab::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSeries {
    info: String,
    points: Vec<Sample>,
}

impl SampleSeries {
    /// Creates an empty series.
    #[must_use]
    pub fn new(info: impl Into<String>) -> Self {
        SampleSeries {
            info: info.into(),
            points: Vec::new(),
        }
    }

    /// Creates a series from existing samples.
    #[must_use]
    pub fn from_points(info: impl Into<String>, points: Vec<Sample>) -> Self {
        SampleSeries {
            info: info.into(),
            points,
        }
    }

    /// Appends a sample.
    pub fn push(&mut self, x: f64, y: f64) {
        self.points.push(Sample { x, y });
    }

    /// Returns the description of the measured algorithm.
    #[must_use]
    pub fn info(&self) -> &str {
        &self.info
    }

    /// Returns the samples in measurement order.
    #[must_use]
    pub fn points(&self) -> &[Sample] {
        &self.points
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if there are no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Serializes to the compact JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) if serialization fails (non-finite numbers are written
    /// as `null` and fail on the way back in).
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses the JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) for malformed documents, including a missing leading
    /// `info` element or an `info` element after the first position.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Writes the series to `path`.
    ///
    /// The document goes to a sibling temporary file first and is renamed into place,
    /// so a failed save leaves any previous file intact.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) or [`Error::Json`](crate::Error::Json) if writing fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec_pretty(self)?;
        write_atomically(path, &json)
    }

    /// Reads a series from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the file cannot be read and [`Error::Json`](crate::Error::Json) if it is
    /// not a valid series document.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read(path)?;
        Ok(serde_json::from_slice(&data)?)
    }
}

impl Serialize for SampleSeries {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.points.len() + 1))?;
        seq.serialize_element(&Entry::Info {
            info: self.info.clone(),
        })?;
        for sample in &self.points {
            seq.serialize_element(&Entry::Point {
                x: sample.x,
                y: sample.y,
            })?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for SampleSeries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        use serde::de::Error as _;

        let mut entries = Vec::<Entry>::deserialize(deserializer)?.into_iter();
        let info = match entries.next() {
            Some(Entry::Info { info }) => info,
            _ => return Err(D::Error::custom("a series must start with an info element")),
        };

        let points = entries
            .map(|entry| match entry {
                Entry::Point { x, y } => Ok(Sample { x, y }),
                Entry::Info { .. } => Err(D::Error::custom("unexpected second info element")),
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(SampleSeries { info, points })
    }
}

/// Outlier removal over a finished series.
///
/// Each interior sample is compared with the median of itself and its two
/// neighbors; if it deviates from that median by more than `threshold` (relative to
/// the median) it is dropped. The first and last samples are always kept. The
/// neighbors are taken from the unfiltered series, so dropping one sample does not
/// change the verdict on the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpikeFilter {
    /// Largest tolerated relative deviation from the local median (default: 0.5)
    pub threshold: f64,
}

impl Default for SpikeFilter {
    fn default() -> Self {
        SpikeFilter { threshold: 0.5 }
    }
}

impl SpikeFilter {
    /// Creates a filter with the given relative threshold.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        SpikeFilter { threshold }
    }

    /// Returns `true` if `sample` should be dropped given its neighbors.
    fn is_spike(&self, previous: f64, sample: f64, next: f64) -> bool {
        let mut window = [previous, sample, next];
        window.sort_by(f64::total_cmp);
        let median = window[1];

        let deviation = (sample - median).abs();
        if median == 0.0 {
            deviation > 0.0
        } else {
            deviation / median.abs() > self.threshold
        }
    }

    /// Returns the samples that survive filtering.
    #[must_use]
    pub fn filter_points(&self, points: &[Sample]) -> Vec<Sample> {
        let last = points.len().saturating_sub(1);
        points
            .iter()
            .enumerate()
            .filter(|&(i, sample)| {
                i == 0 || i == last || !self.is_spike(points[i - 1].y, sample.y, points[i + 1].y)
            })
            .map(|(_, sample)| *sample)
            .collect()
    }

    /// Returns a filtered copy of `series`.
    #[must_use]
    pub fn apply(&self, series: &SampleSeries) -> SampleSeries {
        let points = self.filter_points(series.points());
        let dropped = series.len() - points.len();
        if dropped > 0 {
            log::debug!("Spike filter dropped {dropped} of {} samples", series.len());
        }
        SampleSeries::from_points(series.info(), points)
    }
}
