use std::sync::Arc;

use crate::{
    aggregate::{
        capacity_chart, creation_chart, usage_chart, CapacityChart, CreationChart, UsageChart,
    },
    api::StatsApi,
    models::{DataTable, Dataset},
};

/// Rendering side of the statistics page.
pub trait ChartView: Send + Sync {
    fn draw_creation(&self, chart: &CreationChart);
    fn draw_usage(&self, chart: &UsageChart);
    fn draw_capacity(&self, chart: &CapacityChart);
    /// Fetch failed or the backend had nothing usable.
    fn unavailable(&self, dataset: Dataset);
}

/// Which charts made it onto the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChartsReport {
    pub creation: bool,
    pub usage: bool,
    pub capacity: bool,
}

impl ChartsReport {
    pub fn drawn(&self) -> usize {
        [self.creation, self.usage, self.capacity]
            .into_iter()
            .filter(|d| *d)
            .count()
    }
}

pub struct ChartController<V: ChartView> {
    api: Arc<dyn StatsApi>,
    view: V,
}

impl<V: ChartView> ChartController<V> {
    pub fn new(api: Arc<dyn StatsApi>, view: V) -> Self {
        Self { api, view }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Fetch all three datasets at once and draw whatever arrives.
    pub async fn draw_all(&self) -> ChartsReport {
        let (creation, usage, capacity) = tokio::join!(
            self.fetch(Dataset::Creation),
            self.fetch(Dataset::Use),
            self.fetch(Dataset::LinkSpace),
        );

        let creation = self.draw(
            Dataset::Creation,
            creation.and_then(|t| creation_chart(&t.data)),
            |v, c| v.draw_creation(c),
        );
        let usage = self.draw(
            Dataset::Use,
            usage.and_then(|t| usage_chart(&t.data)),
            |v, c| v.draw_usage(c),
        );
        let capacity = self.draw(
            Dataset::LinkSpace,
            capacity.and_then(|t| capacity_chart(&t.data)),
            |v, c| v.draw_capacity(c),
        );

        ChartsReport {
            creation,
            usage,
            capacity,
        }
    }

    async fn fetch(&self, dataset: Dataset) -> Option<DataTable> {
        match self.api.fetch(dataset).await {
            Ok(table) if !table.is_empty() => Some(table),
            Ok(_) => {
                tracing::info!("No {} data available", dataset.name());
                None
            }
            Err(e) => {
                tracing::warn!("Error fetching data for {}: {}", dataset.name(), e);
                None
            }
        }
    }

    fn draw<C>(&self, dataset: Dataset, chart: Option<C>, draw: impl FnOnce(&V, &C)) -> bool {
        match chart {
            Some(chart) => {
                draw(&self.view, &chart);
                true
            }
            None => {
                self.view.unavailable(dataset);
                false
            }
        }
    }
}
