use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::{Annotation, Point};
use crate::error::{ElementKind, GraphError, GraphResult};

/// One named time series with its annotations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub title: String,
    pub points: Vec<Point>,
    pub notes: Vec<Annotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    /// Explicit value domain. When present it replaces the extent of `points`.
    #[serde(rename = "range", skip_serializing_if = "Option::is_none")]
    pub value_range: Option<(f64, f64)>,
}

impl Dataset {
    #[must_use]
    pub fn new(title: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            title: title.into(),
            points,
            notes: Vec::new(),
            units: None,
            value_range: None,
        }
    }

    #[must_use]
    pub fn with_notes(mut self, notes: Vec<Annotation>) -> Self {
        self.notes = notes;
        self
    }

    #[must_use]
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    #[must_use]
    pub fn with_value_range(mut self, min: f64, max: f64) -> Self {
        self.value_range = Some((min, max));
        self
    }

    /// Checks the dataset against the accepted input policy.
    ///
    /// Points must be non-empty, finite, and in non-decreasing time order.
    /// An explicit range must be finite with `min <= max`. Annotations are
    /// accepted in any order.
    pub fn validate(&self, name: &str) -> GraphResult<()> {
        if self.points.is_empty() {
            return Err(malformed(name, ElementKind::Point, 0, "dataset has no points"));
        }

        let mut previous_time = i64::MIN;
        for (index, point) in self.points.iter().enumerate() {
            if !point.value.is_finite() {
                return Err(malformed(
                    name,
                    ElementKind::Point,
                    index,
                    "value must be finite",
                ));
            }
            if point.time < previous_time {
                return Err(malformed(
                    name,
                    ElementKind::Point,
                    index,
                    "time goes backwards",
                ));
            }
            previous_time = point.time;
        }

        if let Some((min, max)) = self.value_range {
            if !min.is_finite() || !max.is_finite() {
                return Err(GraphError::InvalidData(format!(
                    "range of dataset \"{name}\" must be finite"
                )));
            }
            if min > max {
                return Err(GraphError::InvalidData(format!(
                    "range of dataset \"{name}\" must satisfy min <= max"
                )));
            }
        }

        Ok(())
    }

    fn from_raw(name: &str, raw: RawDataset) -> GraphResult<Self> {
        let mut points = Vec::with_capacity(raw.points.len());
        for (index, point) in raw.points.into_iter().enumerate() {
            let Some(time) = point.time else {
                return Err(malformed(name, ElementKind::Point, index, "missing `time`"));
            };
            let Some(value) = point.value else {
                return Err(malformed(name, ElementKind::Point, index, "missing `value`"));
            };
            points.push(Point::new(time, value));
        }

        let mut notes = Vec::with_capacity(raw.notes.len());
        for (index, note) in raw.notes.into_iter().enumerate() {
            let Some(time) = note.time else {
                return Err(malformed(
                    name,
                    ElementKind::Annotation,
                    index,
                    "missing `time`",
                ));
            };
            let Some(text) = note.text else {
                return Err(malformed(
                    name,
                    ElementKind::Annotation,
                    index,
                    "missing `text`",
                ));
            };
            notes.push(Annotation { time, text });
        }

        // The site generator always writes a range; [0, 0] is its "unset" value.
        let value_range = raw
            .range
            .filter(|range| !(range[0] == 0.0 && range[1] == 0.0))
            .map(|range| (range[0], range[1]));

        let dataset = Self {
            title: raw.title,
            points,
            notes,
            units: raw.units.filter(|units| !units.is_empty()),
            value_range,
        };
        dataset.validate(name)?;
        Ok(dataset)
    }
}

fn malformed(name: &str, kind: ElementKind, index: usize, reason: &str) -> GraphError {
    GraphError::MalformedPoint {
        dataset: name.to_owned(),
        kind,
        index,
        reason: reason.to_owned(),
    }
}

#[derive(Debug, Deserialize)]
struct RawDataset {
    #[serde(default)]
    title: String,
    #[serde(default)]
    points: Vec<RawPoint>,
    #[serde(default)]
    notes: Vec<RawAnnotation>,
    #[serde(default)]
    range: Option<[f64; 2]>,
    #[serde(default)]
    units: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    #[serde(default)]
    time: Option<i64>,
    #[serde(default)]
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawAnnotation {
    #[serde(default)]
    time: Option<i64>,
    #[serde(default)]
    text: Option<String>,
}

/// Read-only mapping from dataset name to content, supplied by the embedding page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DatasetRegistry {
    datasets: IndexMap<String, Dataset>,
}

impl DatasetRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a registry from the JSON object the page embeds.
    pub fn from_json_str(input: &str) -> GraphResult<Self> {
        let raw: IndexMap<String, RawDataset> = serde_json::from_str(input)
            .map_err(|e| GraphError::InvalidData(format!("failed to parse registry json: {e}")))?;

        let mut datasets = IndexMap::with_capacity(raw.len());
        for (name, dataset) in raw {
            let dataset = Dataset::from_raw(&name, dataset)?;
            datasets.insert(name, dataset);
        }
        debug!(count = datasets.len(), "loaded dataset registry");
        Ok(Self { datasets })
    }

    pub fn to_json_pretty(&self) -> GraphResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GraphError::InvalidData(format!("failed to serialize registry: {e}")))
    }

    /// Validates and stores `dataset` under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, dataset: Dataset) -> GraphResult<()> {
        let name = name.into();
        dataset.validate(&name)?;
        self.datasets.insert(name, dataset);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Dataset> {
        self.datasets.get(name)
    }

    pub fn resolve(&self, name: &str) -> GraphResult<&Dataset> {
        let dataset = self
            .datasets
            .get(name)
            .ok_or_else(|| GraphError::DatasetNotFound {
                name: name.to_owned(),
            })?;
        debug!(
            dataset = name,
            points = dataset.points.len(),
            notes = dataset.notes.len(),
            "resolved dataset"
        );
        Ok(dataset)
    }

    /// Resolves the dataset named by a page query string such as `?power`.
    pub fn resolve_query(&self, query: &str) -> GraphResult<&Dataset> {
        self.resolve(dataset_name_from_query(query))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

/// Extracts the dataset name from a URL or search string.
///
/// Takes everything after the first `?` and before any `#`. Input without `?`
/// is treated as the bare search string. Names are not percent-decoded.
#[must_use]
pub fn dataset_name_from_query(input: &str) -> &str {
    let search = match input.split_once('?') {
        Some((_, after)) => after,
        None => input,
    };
    match search.split_once('#') {
        Some((before, _)) => before,
        None => search,
    }
}

#[cfg(test)]
mod tests {
    use super::dataset_name_from_query;

    #[test]
    fn query_name_takes_text_after_question_mark() {
        assert_eq!(dataset_name_from_query("?power"), "power");
        assert_eq!(
            dataset_name_from_query("https://example.org/iframes/graph.html?snow#top"),
            "snow"
        );
        assert_eq!(dataset_name_from_query("temps"), "temps");
        assert_eq!(dataset_name_from_query(""), "");
        assert_eq!(dataset_name_from_query("?"), "");
    }
}
