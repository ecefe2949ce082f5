//! Chart renderers. Each receives the same `(panel, series)` pair.

use crate::core::logic::format_value;
use crate::features::panels::charts::{
    PlotSize, line_chart, palette_color, pie_slices, summarize,
};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use crate::models::{Panel, Series};
use std::rc::Rc;
use yew::prelude::*;

const PLOT: PlotSize = PlotSize {
    width: 600.0,
    height: 200.0,
};

#[derive(Properties, PartialEq)]
pub(crate) struct ChartProps {
    pub panel: Rc<Panel>,
    pub series: Rc<Vec<Series>>,
}

fn default_bundle() -> TranslationBundle {
    TranslationBundle::new(DEFAULT_LOCALE)
}

fn no_data(bundle: &TranslationBundle) -> Html {
    html! {
        <div class="flex h-full items-center justify-center text-sm text-base-content/50">
            {bundle.text("panel.no_data", "No data")}
        </div>
    }
}

fn display(panel: &Panel, value: Option<f64>) -> String {
    format_value(
        value.unwrap_or(f64::NAN),
        panel.options.decimals,
        panel.options.unit.as_deref(),
    )
}

#[function_component(TimeseriesChart)]
pub(crate) fn timeseries_chart(props: &ChartProps) -> Html {
    let bundle = use_context::<TranslationBundle>().unwrap_or_else(default_bundle);
    let Some(chart) = line_chart(&props.series, PLOT) else {
        return no_data(&bundle);
    };
    let view_box = format!("0 0 {} {}", PLOT.width, PLOT.height);
    html! {
        <div class="flex h-full flex-col gap-2">
            <div class="flex justify-between text-xs text-base-content/60">
                <span>{display(&props.panel, Some(chart.y_max))}</span>
                <span>{display(&props.panel, Some(chart.y_min))}</span>
            </div>
            <svg class="w-full flex-1" viewBox={view_box} preserveAspectRatio="none">
                {for chart.lines.iter().flat_map(|line| {
                    line.segments.iter().map(move |points| html! {
                        <polyline points={points.clone()} fill="none" stroke={line.color}
                            stroke-width="1.5" vector-effect="non-scaling-stroke" />
                    })
                })}
            </svg>
            <ul class="flex flex-wrap gap-x-3 text-xs">
                {for chart.lines.iter().map(|line| html! {
                    <li class="flex items-center gap-1">
                        <span class="inline-block size-2 rounded-full" style={format!("background:{}", line.color)}></span>
                        {line.name.clone()}
                    </li>
                })}
            </ul>
        </div>
    }
}

#[function_component(StatChart)]
pub(crate) fn stat_chart(props: &ChartProps) -> Html {
    let bundle = use_context::<TranslationBundle>().unwrap_or_else(default_bundle);
    if props.series.is_empty() {
        return no_data(&bundle);
    }
    html! {
        <div class="stats stats-vertical lg:stats-horizontal h-full w-full">
            {for props.series.iter().enumerate().map(|(index, series)| html! {
                <div class="stat place-items-center">
                    <div class="stat-title truncate">{series.name.clone()}</div>
                    <div class="stat-value" style={format!("color:{}", palette_color(index))}>
                        {display(&props.panel, series.last_value())}
                    </div>
                </div>
            })}
        </div>
    }
}

#[function_component(TableChart)]
pub(crate) fn table_chart(props: &ChartProps) -> Html {
    let bundle = use_context::<TranslationBundle>().unwrap_or_else(default_bundle);
    if props.series.is_empty() {
        return no_data(&bundle);
    }
    let rows = summarize(&props.series);
    let t = |key: &str, default: &str| bundle.text(key, default);
    html! {
        <div class="overflow-auto h-full">
            <table class="table table-xs table-zebra">
                <thead>
                    <tr>
                        <th>{t("panel.series", "Series")}</th>
                        <th class="text-right">{t("panel.last", "Last")}</th>
                        <th class="text-right">{t("panel.min", "Min")}</th>
                        <th class="text-right">{t("panel.max", "Max")}</th>
                        <th class="text-right">{t("panel.avg", "Avg")}</th>
                    </tr>
                </thead>
                <tbody>
                    {for rows.into_iter().map(|row| html! {
                        <tr>
                            <td class="max-w-64 truncate" title={row.name.clone()}>{row.name.clone()}</td>
                            <td class="text-right">{display(&props.panel, row.last)}</td>
                            <td class="text-right">{display(&props.panel, row.min)}</td>
                            <td class="text-right">{display(&props.panel, row.max)}</td>
                            <td class="text-right">{display(&props.panel, row.avg)}</td>
                        </tr>
                    })}
                </tbody>
            </table>
        </div>
    }
}

#[function_component(PieChart)]
pub(crate) fn pie_chart(props: &ChartProps) -> Html {
    let bundle = use_context::<TranslationBundle>().unwrap_or_else(default_bundle);
    let slices = pie_slices(&props.series);
    if slices.is_empty() {
        return no_data(&bundle);
    }
    html! {
        <div class="flex h-full items-center gap-4">
            <svg class="h-full max-h-48 aspect-square" viewBox="-1.05 -1.05 2.1 2.1">
                {for slices.iter().map(|slice| html! {
                    <path d={slice.path.clone()} fill={slice.color}>
                        <title>{slice.name.clone()}</title>
                    </path>
                })}
            </svg>
            <ul class="text-xs space-y-1">
                {for slices.iter().map(|slice| html! {
                    <li class="flex items-center gap-1">
                        <span class="inline-block size-2 rounded-full" style={format!("background:{}", slice.color)}></span>
                        <span class="truncate">{slice.name.clone()}</span>
                        <span class="text-base-content/60">
                            {format!("{} ({:.1}%)", display(&props.panel, Some(slice.value)), slice.fraction * 100.0)}
                        </span>
                    </li>
                })}
            </ul>
        </div>
    }
}
