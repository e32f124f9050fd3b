// Chart-ready series domain models
use serde::Serialize;

/// A single plotted point: epoch milliseconds against a finite reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub x: i64,
    pub y: f64,
}

impl Sample {
    /// Returns `None` unless `y` is finite, so a non-finite reading can never become a point.
    pub fn new(x: i64, y: f64) -> Option<Self> {
        y.is_finite().then_some(Self { x, y })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayHint {
    pub color: Option<String>,
    pub render_as_line: bool,
}

/// Y-axis settings for a circular quantity: ticks every `step`, labelled `mod period`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisConfig {
    pub period: f64,
    pub step_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisTick {
    pub value: f64,
    pub label: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YAxisOptions {
    pub kind: &'static str,
    pub position: &'static str,
    pub circular: Option<AxisConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ticks: Vec<AxisTick>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub x_axis: &'static str,
    pub y_axis: YAxisOptions,
}

impl ChartOptions {
    /// Options for a plain scatter plot over a time axis.
    pub fn scatter() -> Self {
        Self {
            responsive: true,
            x_axis: "time",
            y_axis: YAxisOptions {
                kind: "linear",
                position: "left",
                circular: None,
                ticks: Vec::new(),
            },
        }
    }

    pub fn circular(axis: AxisConfig, ticks: Vec<AxisTick>) -> Self {
        let mut options = Self::scatter();
        options.y_axis.circular = Some(axis);
        options.y_axis.ticks = ticks;
        options
    }
}

/// One named, ordered sequence of samples plus everything a renderer needs to draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub label: String,
    pub points: Vec<Sample>,
    pub display_hint: DisplayHint,
    pub options: ChartOptions,
}

impl Series {
    pub fn new(label: String, points: Vec<Sample>) -> Self {
        Self {
            label,
            points,
            display_hint: DisplayHint {
                color: None,
                render_as_line: true,
            },
            options: ChartOptions::scatter(),
        }
    }

    pub fn with_color(mut self, color: Option<String>) -> Self {
        self.display_hint.color = color;
        self
    }

    pub fn with_options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest and largest `y`, or `None` for an empty series.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        self.points.iter().fold(None, |acc, p| match acc {
            None => Some((p.y, p.y)),
            Some((lo, hi)) => Some((lo.min(p.y), hi.max(p.y))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_rejects_non_finite() {
        assert!(Sample::new(0, f64::NAN).is_none());
        assert!(Sample::new(0, f64::INFINITY).is_none());
        assert_eq!(Sample::new(5, 0.0), Some(Sample { x: 5, y: 0.0 }));
    }

    #[test]
    fn test_y_range() {
        let series = Series::new(
            "wind".to_string(),
            vec![Sample { x: 1, y: 200.0 }, Sample { x: 2, y: 365.0 }, Sample { x: 3, y: 270.0 }],
        );
        assert_eq!(series.y_range(), Some((200.0, 365.0)));
        assert_eq!(Series::new("empty".to_string(), vec![]).y_range(), None);
    }

    #[test]
    fn test_serializes_for_renderer() {
        let series = Series::new("Air temperature".to_string(), vec![Sample { x: 1000, y: 288.1 }])
            .with_color(Some("rgba(0, 255, 0, 1)".to_string()));
        let json = serde_json::to_value(&series).unwrap();

        assert_eq!(json["label"], "Air temperature");
        assert_eq!(json["points"][0]["x"], 1000);
        assert_eq!(json["points"][0]["y"], 288.1);
        assert_eq!(json["displayHint"]["color"], "rgba(0, 255, 0, 1)");
        assert_eq!(json["displayHint"]["renderAsLine"], true);
        assert_eq!(json["options"]["xAxis"], "time");
        assert!(json["options"]["yAxis"].get("ticks").is_none());
    }
}
