use chrono::NaiveDate;
use stock_month_chart::application::ChartService;
use stock_month_chart::domain::chart::{ChartConfig, ChartRenderer};
use stock_month_chart::domain::market_data::{Company, Dataset, Record, Selection};
use stock_month_chart::infrastructure::rendering::SvgRenderer;

fn apple_november() -> Dataset {
    let day = |d| NaiveDate::from_ymd_opt(2023, 11, d).unwrap();
    Dataset::new(vec![
        Record::new("Apple", day(1), 150.0, 152.0),
        Record::new("Apple", day(2), 152.0, 149.0),
    ])
}

#[test]
fn empty_state_exports_the_message_only() {
    let selection = Selection::default().with_company(Company::Microsoft);
    let scene = ChartRenderer::default().render(&apple_november(), &selection);
    let svg = SvgRenderer::new().render(&scene).unwrap();

    assert!(svg.contains(r#"width="800""#));
    assert!(svg.contains(r#"height="400""#));
    assert!(svg.contains("No data for Microsoft in November"));
    assert!(!svg.contains("<circle"));
    assert!(!svg.contains("<polyline"));
}

#[test]
fn plot_contains_series_markers_ticks_and_legend() {
    let service = ChartService::with_dataset(ChartConfig::default(), apple_november());
    let svg = service.export_svg().unwrap();
    let lower = svg.to_lowercase();

    assert!(svg.trim_start().starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(svg.matches("<circle").count(), 2);
    assert_eq!(svg.matches("<rect").count(), 2);
    assert!(svg.contains("Nov 01"));
    assert!(svg.contains("Nov 02"));
    assert!(svg.contains("Open"));
    assert!(svg.contains("Close"));
    assert!(lower.contains("#b2df8a"));
    assert!(lower.contains("#e41a1c"));
}

#[test]
fn price_ticks_group_thousands() {
    let mut config = ChartConfig::default();
    config.default_company = Company::Meta;
    let dataset = Dataset::new(vec![Record::new(
        "Meta",
        NaiveDate::from_ymd_opt(2023, 11, 1).unwrap(),
        1000.0,
        1500.0,
    )]);
    let svg = ChartService::with_dataset(config, dataset).export_svg().unwrap();
    assert!(svg.contains("1,000"));
    assert!(svg.contains("1,500"));
}

#[test]
fn export_is_stable_across_redraws() {
    let service = ChartService::with_dataset(ChartConfig::default(), apple_november());
    assert_eq!(service.export_svg().unwrap(), service.export_svg().unwrap());
}

#[test]
fn plot_scene_json_shape() {
    let scene = ChartRenderer::default().render(&apple_november(), &Selection::default());
    let plot = scene.as_plot().unwrap();
    let summary = serde_json::json!({
        "x_domain": [plot.x_domain.0.to_string(), plot.x_domain.1.to_string()],
        "y_domain": [plot.y_domain.0, plot.y_domain.1],
        "x_ticks": plot.x_axis.ticks.iter().map(|t| &t.label).collect::<Vec<_>>(),
        "legend": plot.legend.iter().map(|e| &e.label).collect::<Vec<_>>(),
    });
    insta::assert_json_snapshot!(summary, @r###"
    {
      "legend": [
        "Open",
        "Close"
      ],
      "x_domain": [
        "2023-11-01",
        "2023-11-02"
      ],
      "x_ticks": [
        "Nov 01",
        "Nov 02"
      ],
      "y_domain": [
        149.0,
        152.0
      ]
    }
    "###);
}
