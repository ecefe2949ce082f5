//! Panel renderer component.
//!
//! # Design
//! - Hooks always run; the blank-panel early return happens after them.
//! - The body is a single match over [`PanelBody`], so exactly one chart
//!   renderer (or the invalid-type message) is produced.

mod charts;

use crate::components::dropdown::Dropdown;
use crate::components::rich_text::RichText;
use crate::core::markdown::render_markdown;
use crate::core::time::TimeRange;
use crate::features::panels::hooks::{use_in_viewport, use_series_query};
use crate::features::panels::query::{SeriesQuery, VariableBindings};
use crate::features::panels::state::{
    ChartKind, PanelBody, PanelCallbacks, PanelMenuEntry, fetch_enabled, panel_menu,
};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use crate::models::{Panel, Series};
use charts::{PieChart, StatChart, TableChart, TimeseriesChart};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct PanelRendererProps {
    pub dashboard_id: AttrValue,
    #[prop_or_default]
    pub id: Option<AttrValue>,
    #[prop_or_default]
    pub panel: Option<Rc<Panel>>,
    pub range: TimeRange,
    #[prop_or_default]
    pub step: Option<u32>,
    /// Chart type tag.
    pub kind: AttrValue,
    #[prop_or_default]
    pub bindings: Option<Rc<VariableBindings>>,
    #[prop_or_default]
    pub is_preview: bool,
    #[prop_or_default]
    pub on_clone: Option<Callback<()>>,
    #[prop_or_default]
    pub on_share: Option<Callback<()>>,
    #[prop_or_default]
    pub on_edit: Option<Callback<()>>,
    #[prop_or_default]
    pub on_delete: Option<Callback<()>>,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(PanelRenderer)]
pub(crate) fn panel_renderer(props: &PanelRendererProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let node = use_node_ref();
    let body = PanelBody::resolve(props.panel.as_deref(), &props.kind);
    let in_viewport = use_in_viewport(node.clone(), !body.is_empty());
    let query = SeriesQuery {
        id: props.id.as_ref().map(ToString::to_string),
        dashboard_id: props.dashboard_id.to_string(),
        range: props.range,
        step: props.step,
        targets: props
            .panel
            .as_ref()
            .map(|panel| panel.targets.clone())
            .unwrap_or_default(),
        bindings: props.bindings.as_deref().cloned().unwrap_or_default(),
    };
    let state = use_series_query(query, fetch_enabled(props.is_preview, in_viewport));
    let description = use_memo(
        |panel: &Option<Rc<Panel>>| {
            panel
                .as_ref()
                .and_then(|panel| panel.description_text().map(render_markdown))
        },
        props.panel.clone(),
    );

    let Some(panel) = props.panel.clone().filter(|_| !body.is_empty()) else {
        return Html::default();
    };

    let callbacks = PanelCallbacks {
        on_clone: props.on_clone.clone(),
        on_share: props.on_share.clone(),
        on_edit: props.on_edit.clone(),
        on_delete: props.on_delete.clone(),
    };
    let menu = panel_menu(&panel, props.is_preview)
        .into_iter()
        .map(|entry| menu_item(&entry, &callbacks, &bundle))
        .collect::<Html>();

    html! {
        <div ref={node} class={classes!("card", "bg-base-100", "shadow", "h-full", props.class.clone())}>
            <div class="flex items-center gap-2 border-b border-base-200 px-3 py-2">
                {(*description).clone().map(|html| html! {
                    <div class="dropdown dropdown-hover dropdown-right">
                        <span tabindex="0" role="button" class="badge badge-ghost badge-sm"
                            aria-label={bundle.text("panel.description", "Description")}>{"i"}</span>
                        <div tabindex="0" class="dropdown-content z-10 w-72 rounded-box bg-base-200 p-3 shadow">
                            <RichText html={AttrValue::from(html)} />
                        </div>
                    </div>
                }).unwrap_or_default()}
                <Dropdown
                    class={classes!("dropdown-bottom", "dropdown-center", "flex-1", "min-w-0")}
                    trigger_class={classes!("flex", "items-center", "justify-center", "gap-1", "font-medium", "truncate")}
                    content_class={classes!("min-w-28")}
                    trigger={html! { <>{panel.name.clone()}<span class="opacity-60">{"▾"}</span></> }}
                >
                    {menu}
                </Dropdown>
                <div class="w-5">
                    {state.loading.then(|| html! {
                        <span class="loading loading-spinner loading-xs"
                            aria-label={bundle.text("panel.loading", "Loading")}></span>
                    }).unwrap_or_default()}
                </div>
            </div>
            <div class="p-3 h-[calc(100%-2.5rem)]">
                {render_body(&body, &panel, &state.series)}
            </div>
        </div>
    }
}

fn render_body(body: &PanelBody, panel: &Rc<Panel>, series: &Rc<Vec<Series>>) -> Html {
    let panel = Rc::clone(panel);
    let series = Rc::clone(series);
    match body {
        PanelBody::Empty => Html::default(),
        PanelBody::Invalid(message) => html! {
            <p class="text-sm text-warning">{message.clone()}</p>
        },
        PanelBody::Chart(ChartKind::Timeseries) => html! { <TimeseriesChart {panel} {series} /> },
        PanelBody::Chart(ChartKind::Stat) => html! { <StatChart {panel} {series} /> },
        PanelBody::Chart(ChartKind::Table) => html! { <TableChart {panel} {series} /> },
        PanelBody::Chart(ChartKind::Pie) => html! { <PieChart {panel} {series} /> },
    }
}

fn menu_item(entry: &PanelMenuEntry, callbacks: &PanelCallbacks, bundle: &TranslationBundle) -> Html {
    let label = bundle.text(entry.action.label_key(), entry.action.default_label());
    if let Some(href) = entry.href.clone() {
        return html! {
            <li><a href={href} target="_blank" rel="noopener noreferrer">{label}</a></li>
        };
    }
    if entry.disabled {
        return html! {
            <li class="menu-disabled"><span>{label}</span></li>
        };
    }
    let onclick = {
        let callbacks = callbacks.clone();
        let action = entry.action;
        Callback::from(move |_: MouseEvent| {
            callbacks.dispatch(action);
        })
    };
    html! {
        <li><button type="button" {onclick}>{label}</button></li>
    }
}
