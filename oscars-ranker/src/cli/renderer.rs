//! Terminal rendering of ranking results
//!
//! Sorting lives here: queries hand over unsorted rows with NULLs intact.

use crate::db::rankings::RankedNominee;
use crate::models::Metric;
use std::cmp::Ordering;
use std::io::{self, Write};

const DEFAULT_BAR_WIDTH: usize = 40;

/// Ranking result for one year/category/metric
#[derive(Debug, Clone, PartialEq)]
pub struct RankingChart {
    pub year: i64,
    pub category: String,
    pub metric: Metric,
    pub nominees: Vec<RankedNominee>,
}

impl RankingChart {
    pub fn title(&self) -> String {
        format!(
            "{} {} Nominees by {}",
            self.year,
            self.category,
            self.metric.label()
        )
    }

    /// Highest value first, missing values last, ties by name
    pub fn sorted(&self) -> Vec<&RankedNominee> {
        let mut nominees: Vec<&RankedNominee> = self.nominees.iter().collect();
        nominees.sort_by(|a, b| match (a.value, b.value) {
            (Some(x), Some(y)) => y
                .as_f64()
                .partial_cmp(&x.as_f64())
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.name.cmp(&b.name),
        });
        nominees
    }
}

/// Presentation boundary for ranking results
pub trait Renderer {
    fn render(&mut self, chart: &RankingChart) -> io::Result<()>;
}

/// Horizontal bar chart drawn with `#`
pub struct TextBarRenderer<W: Write> {
    out: W,
    bar_width: usize,
}

impl<W: Write> TextBarRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextBarRenderer<W> {
    fn render(&mut self, chart: &RankingChart) -> io::Result<()> {
        let title = chart.title();
        writeln!(self.out, "{}", title)?;
        writeln!(self.out, "{}", "-".repeat(title.chars().count()))?;

        if chart.nominees.is_empty() {
            writeln!(self.out, "(no nominees with movie data)")?;
            return self.out.flush();
        }

        let sorted = chart.sorted();
        let name_width = sorted.iter().map(|n| n.name.chars().count()).max().unwrap_or(0);
        let max_value = sorted
            .iter()
            .filter_map(|n| n.value.map(|v| v.as_f64()))
            .fold(0.0_f64, f64::max);

        for nominee in sorted {
            let (bar, label) = match nominee.value {
                Some(value) => {
                    let len = if max_value > 0.0 {
                        ((value.as_f64() / max_value) * self.bar_width as f64)
                            .round()
                            .max(0.0) as usize
                    } else {
                        0
                    };
                    ("#".repeat(len), value.to_string())
                }
                None => (String::new(), "n/a".to_string()),
            };
            writeln!(
                self.out,
                "{:<width$}  {:<bar_width$} {}",
                nominee.name,
                bar,
                label,
                width = name_width,
                bar_width = self.bar_width
            )?;
        }

        self.out.flush()
    }
}
