use super::selection::{SelectionStore, SubscriptionId};
use crate::{
    domain::{
        chart::{ChartConfig, ChartRenderer, ChartScene},
        errors::{AppError, AppResult},
        logging::LogComponent,
        market_data::{Company, Dataset, FilteredSet, Month, Selection},
    },
    infrastructure::rendering::SvgRenderer,
    log_error, log_info, log_warn,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

/// Application service wiring the selection holder to the stateless renderer.
/// Every selection change or dataset replacement produces a freshly rendered scene
/// for each scene subscriber.
pub struct ChartService {
    dataset: Rc<RefCell<Dataset>>,
    renderer: Rc<ChartRenderer>,
    selection: SelectionStore,
}

impl ChartService {
    pub fn new(config: ChartConfig) -> Self {
        let selection = SelectionStore::new(config.default_selection());
        Self {
            dataset: Rc::new(RefCell::new(Dataset::default())),
            renderer: Rc::new(ChartRenderer::new(config)),
            selection,
        }
    }

    pub fn with_dataset(config: ChartConfig, dataset: Dataset) -> Self {
        let service = Self::new(config);
        *service.dataset.borrow_mut() = dataset;
        service
    }

    pub fn selection(&self) -> Selection {
        self.selection.current()
    }

    /// Replace the dataset and redraw
    pub fn set_dataset(&mut self, dataset: Dataset) {
        log_info!(LogComponent::Application("ChartService"), "dataset replaced: {} records", dataset.len());
        *self.dataset.borrow_mut() = dataset;
        self.selection.refresh();
    }

    pub fn set_company(&mut self, company: Company) -> bool {
        self.selection.set_company(company)
    }

    pub fn set_month(&mut self, month: Month) -> bool {
        self.selection.set_month(month)
    }

    /// Select a company by display name
    pub fn select_company(&mut self, name: &str) -> AppResult<bool> {
        let company = Company::from_str(name).map_err(|_| {
            log_warn!(LogComponent::Application("ChartService"), "unknown company {:?}", name);
            AppError::InvalidSelection(format!("unknown company '{name}'"))
        })?;
        Ok(self.set_company(company))
    }

    /// Select a month by long English name
    pub fn select_month(&mut self, name: &str) -> AppResult<bool> {
        let month = Month::from_str(name).map_err(|_| {
            log_warn!(LogComponent::Application("ChartService"), "unknown month {:?}", name);
            AppError::InvalidSelection(format!("unknown month '{name}'"))
        })?;
        Ok(self.set_month(month))
    }

    /// Render the current state
    pub fn scene(&self) -> ChartScene {
        self.renderer.render(&self.dataset.borrow(), &self.selection.current())
    }

    pub fn filtered(&self) -> FilteredSet {
        self.dataset.borrow().filter(&self.selection.current())
    }

    /// Call `on_scene` with a new scene after every change
    pub fn subscribe_scene<F>(&mut self, on_scene: F) -> SubscriptionId
    where
        F: Fn(&ChartScene) + 'static,
    {
        let dataset = Rc::clone(&self.dataset);
        let renderer = Rc::clone(&self.renderer);
        self.selection.subscribe(move |selection| on_scene(&renderer.render(&dataset.borrow(), selection)))
    }

    /// Call `on_selection` after every selection change
    pub fn subscribe_selection<F>(&mut self, on_selection: F) -> SubscriptionId
    where
        F: Fn(&Selection) + 'static,
    {
        self.selection.subscribe(on_selection)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.selection.unsubscribe(id)
    }

    /// Standalone SVG markup of the current state
    pub fn export_svg(&self) -> AppResult<String> {
        SvgRenderer::new().render(&self.scene()).inspect_err(|err| {
            log_error!(LogComponent::Application("ChartService"), "SVG export failed: {}", err);
        })
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new(ChartConfig::default())
    }
}
