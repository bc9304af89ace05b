use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;
use strum::IntoEnumIterator;
use wasm_bindgen::JsCast;

use crate::{
    application::ChartService,
    domain::{
        chart::{Axis, ChartScene, PlotScene, Tooltip},
        errors::{AppError, AppResult},
        logging::LogComponent,
        market_data::{Company, Month, Selection},
    },
    log_info, log_warn,
};

const STYLES: &str = r#"
.stock-chart {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
    font-size: 12px;
}

.stock-chart .controls {
    margin-bottom: 10px;
}

.stock-chart .controls h3 {
    display: inline-block;
    margin: 0 8px 0 0;
    font-size: 14px;
}

.stock-chart .controls label {
    margin-right: 10px;
}

.stock-chart .tooltip {
    position: absolute;
    background: rgba(255, 255, 255, 0.95);
    border: 1px solid #ccc;
    border-radius: 4px;
    padding: 6px 8px;
    pointer-events: none;
    transition: opacity 0.1s;
}
"#;

/// Root of the widget: control panel, SVG chart and tooltip overlay
#[component]
pub fn App(service: Rc<RefCell<ChartService>>) -> impl IntoView {
    let scene = create_rw_signal(service.borrow().scene());
    let selection = create_rw_signal(service.borrow().selection());
    let tooltip = create_rw_signal::<Option<Tooltip>>(None);

    let subscriptions = {
        let mut svc = service.borrow_mut();
        [
            svc.subscribe_scene(move |next| {
                tooltip.set(None);
                scene.set(next.clone());
            }),
            svc.subscribe_selection(move |next| selection.set(*next)),
        ]
    };

    let service = store_value(service);
    on_cleanup(move || {
        service.try_with_value(|svc| {
            let mut svc = svc.borrow_mut();
            for id in subscriptions {
                svc.unsubscribe(id);
            }
        });
    });

    let on_company = Callback::new(move |company: Company| {
        service.with_value(|svc| {
            svc.borrow_mut().set_company(company);
        });
    });
    let on_month = Callback::new(move |month: Month| {
        service.with_value(|svc| {
            svc.borrow_mut().set_month(month);
        });
    });

    view! {
        <style>{STYLES}</style>
        <div class="stock-chart">
            <ControlPanel selection=selection.read_only() on_company=on_company on_month=on_month />
            <ChartSurface scene=scene.read_only() tooltip=tooltip />
            <ChartTooltip tooltip=tooltip.read_only() />
        </div>
    }
}

/// Company radio group and month dropdown
#[component]
fn ControlPanel(
    selection: ReadSignal<Selection>,
    on_company: Callback<Company>,
    on_month: Callback<Month>,
) -> impl IntoView {
    let companies = Company::iter()
        .map(|company| {
            view! {
                <label>
                    <input
                        type="radio"
                        name="company"
                        value=company.to_string()
                        prop:checked=move || selection.with(|s| s.company == company)
                        on:change=move |_| on_company.call(company)
                    />
                    {company.to_string()}
                </label>
            }
        })
        .collect_view();

    let months = Month::iter()
        .map(|month| {
            view! {
                <option value=month.to_string() selected=move || selection.with(|s| s.month == month)>
                    {month.to_string()}
                </option>
            }
        })
        .collect_view();

    view! {
        <div class="controls">
            <h3>"Company:"</h3>
            {companies}
            <h3>"Select Month:"</h3>
            <select
                prop:value=move || selection.with(|s| s.month.to_string())
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    match Month::from_str(&value) {
                        Ok(month) => on_month.call(month),
                        Err(_) => {
                            log_warn!(LogComponent::Presentation("ControlPanel"), "ignoring month {:?}", value);
                        }
                    }
                }
            >
                {months}
            </select>
        </div>
    }
}

/// SVG drawing surface; redrawn from scratch whenever the scene changes
#[component]
fn ChartSurface(scene: ReadSignal<ChartScene>, tooltip: RwSignal<Option<Tooltip>>) -> impl IntoView {
    let width = move || scene.with(|s| s.frame().map(|f| f.width));
    let height = move || scene.with(|s| s.frame().map(|f| f.height));

    view! {
        <svg id="chart" width=width height=height>
            {move || match scene.get() {
                ChartScene::Blank => ().into_view(),
                ChartScene::NoData { frame, message } => {
                    view! {
                        <g transform=frame.plot_transform()>
                            <text
                                x=frame.inner_width() / 2.0
                                y=frame.inner_height() / 2.0
                                text-anchor="middle"
                                fill="#666"
                            >
                                {message}
                            </text>
                        </g>
                    }
                        .into_view()
                }
                ChartScene::Plot(plot) => plot_view(plot, tooltip).into_view(),
            }}
        </svg>
    }
}

fn plot_view(plot: PlotScene, tooltip: RwSignal<Option<Tooltip>>) -> impl IntoView {
    let inner_height = plot.frame.inner_height();

    let series = plot
        .series
        .iter()
        .map(|series| {
            view! {
                <path
                    class=format!("series {}", series.kind.as_ref().to_lowercase())
                    fill="none"
                    stroke=series.color.clone()
                    stroke-width=series.stroke_width
                    d=series.path_data()
                />
            }
        })
        .collect_view();

    let markers = plot
        .markers
        .into_iter()
        .map(|marker| {
            let content = marker.tooltip;
            view! {
                <circle
                    class="dot"
                    cx=marker.cx
                    cy=marker.cy
                    r=marker.radius
                    fill=marker.fill
                    on:mouseover=move |ev: web_sys::MouseEvent| {
                        tooltip.set(Some(Tooltip::at_pointer(content.clone(), ev.page_x() as f64, ev.page_y() as f64)));
                    }
                    on:mouseout=move |_| tooltip.set(None)
                />
            }
        })
        .collect_view();

    let legend = plot
        .legend
        .into_iter()
        .map(|entry| {
            view! {
                <rect
                    x=entry.swatch_x
                    y=entry.swatch_y
                    width=entry.swatch_size
                    height=entry.swatch_size
                    fill=entry.color
                />
                <text x=entry.label_x y=entry.label_y>{entry.label}</text>
            }
        })
        .collect_view();

    view! {
        <g transform=plot.frame.plot_transform()>
            {axis_view(&plot.x_axis, inner_height)}
            {axis_view(&plot.y_axis, inner_height)}
            {series}
            {markers}
            {legend}
        </g>
    }
}

fn axis_view(axis: &Axis, inner_height: f64) -> View {
    let (x2, y2) = axis.tick_line_end();
    let (label_x, label_y, anchor, dy) = axis.label_placement();
    let ticks = axis
        .ticks
        .iter()
        .map(|tick| {
            view! {
                <g class="tick" transform=axis.tick_transform(tick)>
                    <line stroke="currentColor" x2=x2 y2=y2 />
                    <text fill="currentColor" x=label_x y=label_y dy=dy text-anchor=anchor>
                        {tick.label.clone()}
                    </text>
                </g>
            }
        })
        .collect_view();

    view! {
        <g class="axis" transform=axis.transform(inner_height)>
            <path class="domain" stroke="currentColor" fill="none" d=axis.domain_path() />
            {ticks}
        </g>
    }
    .into_view()
}

/// Floating HTML overlay shown while a point marker is hovered
#[component]
fn ChartTooltip(tooltip: ReadSignal<Option<Tooltip>>) -> impl IntoView {
    view! {
        <div
            id="tooltip"
            class="tooltip"
            style:opacity=move || if tooltip.with(Option::is_some) { "1" } else { "0" }
            style:left=move || tooltip.with(|t| t.as_ref().map(|t| format!("{}px", t.left)).unwrap_or_default())
            style:top=move || tooltip.with(|t| t.as_ref().map(|t| format!("{}px", t.top)).unwrap_or_default())
        >
            {move || {
                tooltip.with(|t| {
                    t.as_ref().map(|t| {
                        t.content.lines().into_iter().map(|line| view! { <div>{line}</div> }).collect_view()
                    })
                })
            }}
        </div>
    }
}

/// Mount the widget into the element with the given id
pub fn mount_chart(element_id: &str, service: Rc<RefCell<ChartService>>) -> AppResult<()> {
    let element = document()
        .get_element_by_id(element_id)
        .ok_or_else(|| AppError::Mount(format!("element #{element_id} not found")))?
        .dyn_into::<web_sys::HtmlElement>()
        .map_err(|_| AppError::Mount(format!("element #{element_id} is not an HTML element")))?;

    log_info!(LogComponent::Presentation("App"), "mounting chart into #{}", element_id);
    mount_to(element, move || view! { <App service=service /> });
    Ok(())
}
