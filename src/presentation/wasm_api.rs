use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

use crate::{
    app::mount_chart,
    application::ChartService,
    domain::{
        chart::ChartConfig,
        logging::LogComponent,
        market_data::Dataset,
    },
    log_info,
};

/// JavaScript handle to one chart widget. The parent page owns the data and hands it
/// in as a JSON array of `{Company, Date, Open, Close}` records.
#[wasm_bindgen]
pub struct StockChartApi {
    service: Rc<RefCell<ChartService>>,
    mounted: bool,
}

#[wasm_bindgen]
impl StockChartApi {
    /// Create a widget, optionally from a JSON config (missing fields use defaults)
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<StockChartApi, JsValue> {
        let config = match config_json.as_deref() {
            Some(json) => ChartConfig::from_json(json)?,
            None => ChartConfig::default(),
        };
        Ok(Self { service: Rc::new(RefCell::new(ChartService::new(config))), mounted: false })
    }

    /// Load the records and render into the element with id `element_id`
    pub fn mount(&mut self, element_id: &str, records_json: &str) -> Result<(), JsValue> {
        if self.mounted {
            return Err(JsValue::from_str("chart is already mounted"));
        }
        let dataset = Dataset::from_json(records_json)?;
        self.service.borrow_mut().set_dataset(dataset);
        mount_chart(element_id, Rc::clone(&self.service))?;
        self.mounted = true;
        Ok(())
    }

    /// Replace the records and redraw
    #[wasm_bindgen(js_name = setData)]
    pub fn set_data(&mut self, records_json: &str) -> Result<(), JsValue> {
        let dataset = Dataset::from_json(records_json)?;
        self.service.borrow_mut().set_dataset(dataset);
        Ok(())
    }

    #[wasm_bindgen(js_name = setCompany)]
    pub fn set_company(&mut self, name: &str) -> Result<bool, JsValue> {
        Ok(self.service.borrow_mut().select_company(name)?)
    }

    #[wasm_bindgen(js_name = setMonth)]
    pub fn set_month(&mut self, name: &str) -> Result<bool, JsValue> {
        Ok(self.service.borrow_mut().select_month(name)?)
    }

    #[wasm_bindgen(js_name = selectedCompany)]
    pub fn selected_company(&self) -> String {
        self.service.borrow().selection().company.to_string()
    }

    #[wasm_bindgen(js_name = selectedMonth)]
    pub fn selected_month(&self) -> String {
        self.service.borrow().selection().month.to_string()
    }

    /// Number of records matching the current selection
    #[wasm_bindgen(js_name = filteredCount)]
    pub fn filtered_count(&self) -> usize {
        self.service.borrow().filtered().len()
    }

    /// Current chart as standalone SVG markup
    #[wasm_bindgen(js_name = exportSvg)]
    pub fn export_svg(&self) -> Result<String, JsValue> {
        let svg = self.service.borrow().export_svg()?;
        log_info!(LogComponent::Presentation("WasmApi"), "exported {} bytes of SVG", svg.len());
        Ok(svg)
    }
}
