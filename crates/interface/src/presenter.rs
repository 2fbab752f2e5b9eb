//! Item presenters for `list`

use chrono::NaiveDate;
use nin_core::{group_items, Item, Presenter};
use tracing::warn;

use crate::cli::OutputFormat;
use crate::dates::format_day;

/// Grouped by day with checkbox lines
#[derive(Debug, Clone)]
pub struct PrettyPresenter {
    today: NaiveDate,
}

impl PrettyPresenter {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    fn line(item: &Item) -> String {
        let check = if item.completed { 'x' } else { ' ' };
        let mut line = format!("{:>4} [{}] {}", item.id, check, item.desc);
        for tag in &item.tags {
            line.push_str(" #");
            line.push_str(tag);
        }
        if item.archived {
            line.push_str(" (archived)");
        }
        line
    }
}

impl Presenter for PrettyPresenter {
    fn render(&self, items: &[&Item]) -> String {
        let groups = group_items(items.iter().copied(), |item| item.date);
        let blocks: Vec<String> = groups
            .into_iter()
            .map(|(date, members)| {
                let mut block = format_day(date, self.today);
                block.push('\n');
                for item in members {
                    block.push_str(&Self::line(item));
                    block.push('\n');
                }
                block
            })
            .collect();
        blocks.join("\n")
    }
}

/// One `id desc` line per item
#[derive(Debug, Clone, Default)]
pub struct MinimalPresenter;

impl Presenter for MinimalPresenter {
    fn render(&self, items: &[&Item]) -> String {
        items
            .iter()
            .map(|item| format!("{} {}\n", item.id, item.desc))
            .collect()
    }
}

/// Pretty-printed JSON array
#[derive(Debug, Clone, Default)]
pub struct JsonPresenter;

impl Presenter for JsonPresenter {
    fn render(&self, items: &[&Item]) -> String {
        match serde_json::to_string_pretty(items) {
            Ok(mut json) => {
                json.push('\n');
                json
            }
            Err(e) => {
                warn!("Failed to render items as JSON: {e}");
                String::new()
            }
        }
    }
}

pub fn presenter_for(format: OutputFormat, today: NaiveDate) -> Box<dyn Presenter> {
    match format {
        OutputFormat::Pretty => Box::new(PrettyPresenter::new(today)),
        OutputFormat::Minimal => Box::new(MinimalPresenter),
        OutputFormat::Json => Box::new(JsonPresenter),
    }
}
