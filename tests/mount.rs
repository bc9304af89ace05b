#![cfg(target_arch = "wasm32")]

use stock_month_chart::presentation::StockChartApi;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Event, EventInit, HtmlElement, HtmlInputElement, HtmlSelectElement, MouseEvent, MouseEventInit};

wasm_bindgen_test_configure!(run_in_browser);

const RECORDS: &str = r#"[
    {"Company": "Apple", "Date": "2023-11-01", "Open": 150, "Close": 152},
    {"Company": "Apple", "Date": "2023-11-02", "Open": 152, "Close": 149},
    {"Company": "Amazon", "Date": "2023-11-01", "Open": 138, "Close": 137.5}
]"#;

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn host(id: &str) {
    let div = document().create_element("div").unwrap();
    div.set_id(id);
    document().body().unwrap().append_child(&div).unwrap();
}

fn mounted(id: &str) -> StockChartApi {
    host(id);
    let mut api = StockChartApi::new(None).unwrap();
    api.mount(id, RECORDS).unwrap();
    api
}

fn query<T: JsCast>(selector: &str) -> T {
    document().query_selector(selector).unwrap().unwrap().dyn_into::<T>().unwrap()
}

fn count(selector: &str) -> u32 {
    document().query_selector_all(selector).unwrap().length()
}

fn bubbling(kind: &str) -> Event {
    let init = EventInit::new();
    init.set_bubbles(true);
    Event::new_with_event_init_dict(kind, &init).unwrap()
}

fn pointer(kind: &str, x: i32, y: i32) -> MouseEvent {
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_client_x(x);
    init.set_client_y(y);
    MouseEvent::new_with_mouse_event_init_dict(kind, &init).unwrap()
}

fn style(element: &HtmlElement, property: &str) -> String {
    element.style().get_property_value(property).unwrap()
}

#[wasm_bindgen_test]
fn mounts_and_draws_markers() {
    let api = mounted("chart-host-a");
    assert_eq!(count("#chart-host-a circle.dot"), 2);
    assert_eq!(count("#chart-host-a input[name=company]"), 5);
    assert_eq!(count("#chart-host-a select option"), 12);
    assert_eq!(api.filtered_count(), 2);
}

#[wasm_bindgen_test]
fn switching_company_clears_the_plot() {
    host("chart-host-b");
    let mut api = StockChartApi::new(Some(r#"{"width": 600}"#.to_string())).unwrap();
    api.mount("chart-host-b", RECORDS).unwrap();

    assert_eq!(api.set_company("Microsoft").unwrap(), true);
    assert_eq!(count("#chart-host-b circle"), 0);
    assert_eq!(api.selected_company(), "Microsoft");
    assert!(api.set_month("Brumaire").is_err());
}

#[wasm_bindgen_test]
fn missing_host_is_an_error() {
    let mut api = StockChartApi::new(None).unwrap();
    assert!(api.mount("no-such-element", RECORDS).is_err());
}

#[wasm_bindgen_test]
fn company_radio_redraws_for_that_company() {
    let api = mounted("chart-host-c");
    let radio: HtmlInputElement = query("#chart-host-c input[name=company][value=Amazon]");

    radio.set_checked(true);
    radio.dispatch_event(&bubbling("change")).unwrap();

    assert_eq!(api.selected_company(), "Amazon");
    assert_eq!(api.filtered_count(), 1);
    assert_eq!(count("#chart-host-c circle.dot"), 1);
}

#[wasm_bindgen_test]
fn month_dropdown_redraws_and_shows_empty_state() {
    let api = mounted("chart-host-d");
    let select: HtmlSelectElement = query("#chart-host-d select");
    assert_eq!(select.value(), "November");

    select.set_value("December");
    select.dispatch_event(&bubbling("change")).unwrap();

    assert_eq!(api.selected_month(), "December");
    assert_eq!(count("#chart-host-d circle.dot"), 0);
    let message = document().query_selector("#chart-host-d svg text").unwrap().unwrap();
    assert_eq!(message.text_content().unwrap(), "No data for Apple in December");
}

#[wasm_bindgen_test]
fn hovering_a_marker_toggles_the_tooltip() {
    let _api = mounted("chart-host-e");
    let tooltip: HtmlElement = query("#chart-host-e #tooltip");
    let dot: web_sys::Element = query("#chart-host-e circle.dot");
    assert_eq!(style(&tooltip, "opacity"), "0");

    dot.dispatch_event(&pointer("mouseover", 100, 200)).unwrap();
    assert_eq!(style(&tooltip, "opacity"), "1");
    assert_eq!(style(&tooltip, "left"), "110px");
    assert_eq!(style(&tooltip, "top"), "172px");
    let text = tooltip.text_content().unwrap();
    assert!(text.contains("Date: 11/1/2023"), "{text}");
    assert!(text.contains("Diff: 2.00"), "{text}");

    dot.dispatch_event(&pointer("mouseout", 100, 200)).unwrap();
    assert_eq!(style(&tooltip, "opacity"), "0");
}
