//! Declarative Chart.js configuration for the four dashboard charts.
//!
//! Nothing here touches the DOM. The browser side plugs in through
//! [`ChartHost`]; the value-label formatter callback and the datalabels
//! plugin are attached there because they only exist as JS objects.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChartSlot {
    WeeklyExpense,
    MonthlyExpense,
    WeeklyIncome,
    MonthlyIncome,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 4] = [
        ChartSlot::WeeklyExpense,
        ChartSlot::MonthlyExpense,
        ChartSlot::WeeklyIncome,
        ChartSlot::MonthlyIncome,
    ];

    pub fn container_id(self) -> &'static str {
        match self {
            ChartSlot::WeeklyExpense => "weeklyChartExp",
            ChartSlot::MonthlyExpense => "monthlyChartExp",
            ChartSlot::WeeklyIncome => "weeklyChartInc",
            ChartSlot::MonthlyIncome => "monthlyChartInc",
        }
    }

    pub fn kind(self) -> ChartKind {
        match self {
            ChartSlot::WeeklyExpense | ChartSlot::WeeklyIncome => ChartKind::Bar,
            ChartSlot::MonthlyExpense | ChartSlot::MonthlyIncome => ChartKind::Line,
        }
    }

    pub fn background_color(self) -> &'static str {
        match self {
            ChartSlot::WeeklyExpense => "rgba(255,99,132,0.6)",
            ChartSlot::MonthlyExpense => "rgba(54,162,235,0.6)",
            ChartSlot::WeeklyIncome => "rgba(75,192,192,0.6)",
            ChartSlot::MonthlyIncome => "rgba(153,102,255,0.6)",
        }
    }

    /// Line charts draw their stroke in the opaque variant of the fill.
    pub fn border_color(self) -> Option<&'static str> {
        match self {
            ChartSlot::MonthlyExpense => Some("rgba(54,162,235,1)"),
            ChartSlot::MonthlyIncome => Some("rgba(153,102,255,1)"),
            _ => None,
        }
    }

    pub fn x_axis_title(self) -> &'static str {
        match self.kind() {
            ChartKind::Bar => "Hari",
            ChartKind::Line => "Bulan",
        }
    }

    pub fn series(self, data: &ChartData) -> &Series {
        match self {
            ChartSlot::WeeklyExpense => &data.weekly_expense,
            ChartSlot::MonthlyExpense => &data.monthly_expense,
            ChartSlot::WeeklyIncome => &data.weekly_income,
            ChartSlot::MonthlyIncome => &data.monthly_income,
        }
    }
}

impl fmt::Display for ChartSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.container_id())
    }
}

/// Labels and values as handed over by the server; never reordered.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default)]
    pub labels: Vec<String>,
    /// `None` is a gap: the page sent `null` or something that is not a
    /// number. Gaps keep their position and go to Chart.js as `null`.
    #[serde(default, deserialize_with = "deserialize_points")]
    pub values: Vec<Option<f64>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPoint {
    Number(f64),
    Other(serde::de::IgnoredAny),
}

/// Reads a value array without rejecting it over a single odd entry.
pub fn deserialize_points<'de, D>(deserializer: D) -> Result<Vec<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<RawPoint>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|point| match point {
            RawPoint::Number(n) => Some(n),
            RawPoint::Other(_) => None,
        })
        .collect())
}

impl Series {
    pub fn new(labels: Vec<String>, values: Vec<Option<f64>>) -> Self {
        Series { labels, values }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.values.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartData {
    pub weekly_expense: Series,
    pub monthly_expense: Series,
    pub weekly_income: Series,
    pub monthly_income: Series,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartBody,
    pub options: ChartOptions,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartBody {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub data: Vec<Option<f64>>,
    pub background_color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub plugins: PluginOptions,
    pub scales: Scales,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PluginOptions {
    pub legend: Legend,
    pub tooltip: Tooltip,
    pub datalabels: DataLabels,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tooltip {
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DataLabels {
    pub anchor: &'static str,
    pub align: &'static str,
    pub font: Font,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Font {
    pub weight: &'static str,
    pub size: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scales {
    pub y: Axis,
    pub x: Axis,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    pub title: AxisTitle,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: &'static str,
}

impl ChartConfig {
    pub fn for_slot(slot: ChartSlot, series: &Series) -> Self {
        let line = slot.kind() == ChartKind::Line;
        ChartConfig {
            kind: slot.kind(),
            data: ChartBody {
                labels: series.labels.clone(),
                datasets: vec![Dataset {
                    data: series.values.clone(),
                    background_color: slot.background_color(),
                    border_color: slot.border_color(),
                    fill: line.then_some(false),
                    tension: line.then_some(0.4),
                }],
            },
            options: ChartOptions {
                responsive: true,
                plugins: PluginOptions {
                    legend: Legend { display: false },
                    tooltip: Tooltip { enabled: false },
                    datalabels: DataLabels {
                        anchor: "end",
                        align: "top",
                        font: Font {
                            weight: "bold",
                            size: 11,
                        },
                    },
                },
                scales: Scales {
                    y: Axis {
                        begin_at_zero: Some(true),
                        title: AxisTitle {
                            display: true,
                            text: "Nominal",
                        },
                    },
                    x: Axis {
                        begin_at_zero: None,
                        title: AxisTitle {
                            display: true,
                            text: slot.x_axis_title(),
                        },
                    },
                },
            },
        }
    }

    pub fn point_count(&self) -> usize {
        self.data.datasets.iter().map(|d| d.data.len()).sum()
    }
}

/// Where charts get drawn. The page implementation looks containers up by
/// id and hands the configuration to Chart.js.
pub trait ChartHost {
    type Container;
    type Error: fmt::Display;

    fn container(&self, id: &str) -> Option<Self::Container>;

    fn construct(
        &mut self,
        slot: ChartSlot,
        container: Self::Container,
        config: &ChartConfig,
    ) -> Result<(), Self::Error>;
}

/// Draws every slot whose container is on the page. Slots are independent:
/// a missing container is skipped and a failed construction is logged, and
/// neither stops the remaining slots. Returns the slots that were drawn.
pub fn render_charts<H: ChartHost>(host: &mut H, data: &ChartData) -> Vec<ChartSlot> {
    let mut rendered = Vec::new();
    for slot in ChartSlot::ALL {
        let Some(container) = host.container(slot.container_id()) else {
            log::debug!("no #{} on this page, skipping", slot);
            continue;
        };

        let config = ChartConfig::for_slot(slot, slot.series(data));
        match host.construct(slot, container, &config) {
            Ok(()) => {
                log::debug!("drew #{} with {} points", slot, config.point_count());
                rendered.push(slot);
            }
            Err(e) => log::error!("could not draw #{}: {}", slot, e),
        }
    }
    log::info!("rendered {} of {} charts", rendered.len(), ChartSlot::ALL.len());
    rendered
}
