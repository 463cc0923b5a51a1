//! Interactive year / category / metric selection loop

use super::renderer::{RankingChart, Renderer};
use crate::db::rankings::{categories_for_year, rank_nominees};
use crate::error::{PipelineError, PipelineResult};
use crate::models::Metric;
use sqlx::SqlitePool;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use tracing::debug;

pub const MIN_YEAR: i64 = 1927;
pub const MAX_YEAR: i64 = 2017;

const EXIT_TOKEN: &str = "exit";
const YEAR_PROMPT: &str = "Enter a year (must be between 1927 - 2017): ";
const CATEGORY_PROMPT: &str = "Select a Nomination Category: ";
const METRIC_PROMPT: &str = "Choose a criterion for ranking the nominees: ";
const INVALID_YEAR: &str = "ERROR - please enter a valid year";
const INVALID_CHOICE: &str = "ERROR - please enter a number from the list above";

/// Parse a year within the supported range
pub fn parse_year(input: &str) -> PipelineResult<i64> {
    input
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|year| (MIN_YEAR..=MAX_YEAR).contains(year))
        .ok_or_else(|| PipelineError::InputInvalid(INVALID_YEAR.to_string()))
}

/// Parse a 1-based menu selection
pub fn parse_menu_choice(input: &str, max: usize) -> PipelineResult<usize> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|choice| (1..=max).contains(choice))
        .ok_or_else(|| PipelineError::InputInvalid(INVALID_CHOICE.to_string()))
}

fn is_exit(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(EXIT_TOKEN)
}

/// Line-oriented prompt over any reader/writer pair
pub struct UserPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> UserPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until `exit` or end of input
    pub async fn run(&mut self, pool: &SqlitePool, renderer: &mut dyn Renderer) -> PipelineResult<()> {
        loop {
            let Some(year) = self.ask(YEAR_PROMPT, parse_year)? else {
                return Ok(());
            };

            let categories = categories_for_year(pool, year).await?;
            if categories.is_empty() {
                writeln!(self.output, "No ranked categories for {}", year)?;
                continue;
            }

            self.print_categories(&categories)?;
            let Some(choice) = self.ask(CATEGORY_PROMPT, |s| parse_menu_choice(s, categories.len()))?
            else {
                return Ok(());
            };
            let Some(category) = categories.get(&choice) else {
                continue;
            };

            self.print_metrics()?;
            let Some(metric) = self.ask(METRIC_PROMPT, |s| {
                parse_menu_choice(s, Metric::ALL.len()).map(|i| Metric::ALL[i - 1])
            })?
            else {
                return Ok(());
            };

            debug!(year, category = %category, metric = %metric, "Ranking nominees");
            let nominees = rank_nominees(pool, year, category, metric).await?;
            renderer.render(&RankingChart {
                year,
                category: category.clone(),
                metric,
                nominees,
            })?;
            writeln!(self.output)?;
        }
    }

    /// Prompt until `parse` accepts the line. `None` means the user is done.
    fn ask<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> PipelineResult<T>,
    ) -> PipelineResult<Option<T>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            if is_exit(&line) {
                return Ok(None);
            }
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(PipelineError::InputInvalid(message)) => {
                    writeln!(self.output, "{}", message)?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> PipelineResult<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn print_categories(&mut self, categories: &BTreeMap<usize, String>) -> PipelineResult<()> {
        writeln!(self.output)?;
        for (index, name) in categories {
            writeln!(self.output, "{}. {}", index, name)?;
        }
        writeln!(self.output)?;
        Ok(())
    }

    fn print_metrics(&mut self) -> PipelineResult<()> {
        writeln!(self.output)?;
        for metric in Metric::ALL {
            writeln!(self.output, "{}. {}", metric.index(), metric.label())?;
        }
        writeln!(self.output)?;
        Ok(())
    }
}
