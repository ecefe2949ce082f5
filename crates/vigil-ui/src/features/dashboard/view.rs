//! Dashboard pages: the panel grid and the single shared panel.
//!
//! # Design
//! - Both pages load the board through [`use_board`], keyed by board id.
//! - Clone and delete edit the loaded configuration in place, re-render,
//!   then persist the whole document through a [`SaveQueue`]; a failed save
//!   is logged and the local edit is kept.

use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::components::select::Select;
use crate::core::request::SettleOutcome;
use crate::core::time::{STEP_OPTIONS, TimeRange};
use crate::features::dashboard::api::{fetch_board, save_board_configs};
use crate::features::dashboard::state::{
    BoardSave, BoardView, DashboardModel, GRID_COLUMNS, SaveQueue, clone_panel, panel_span,
    remove_panel,
};
use crate::features::panels::PanelRenderer;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use crate::models::BoardConfig;
use gloo::console;
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;
use yew::functional::UseForceUpdateHandle;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone)]
struct BoardHandle {
    model: Rc<RefCell<DashboardModel>>,
    saves: Rc<RefCell<SaveQueue>>,
    rerender: UseForceUpdateHandle,
}

impl BoardHandle {
    fn snapshot(&self) -> (Option<BoardView>, bool) {
        let model = self.model.borrow();
        (model.value().clone(), model.loading())
    }

    /// Apply `edit` to the loaded configuration and persist it when it
    /// reports a change.
    fn edit(
        &self,
        api_ctx: Option<&ApiCtx>,
        board_id: &str,
        edit: impl FnOnce(&mut BoardConfig) -> bool,
    ) {
        let body = {
            let mut model = self.model.borrow_mut();
            let Some(view) = model.value_mut().as_mut() else {
                return;
            };
            if !edit(&mut view.config) {
                return;
            }
            view.save_body()
        };
        self.rerender.force_update();

        let body = match body {
            Ok(body) => body,
            Err(err) => {
                console::error!("board configuration encode failed", err.to_string());
                return;
            }
        };
        let Some(api_ctx) = api_ctx.cloned() else {
            return;
        };
        let save = BoardSave {
            board_id: board_id.to_string(),
            body,
        };
        let Some(first) = self.saves.borrow_mut().submit(save) else {
            return;
        };
        let saves = Rc::clone(&self.saves);
        yew::platform::spawn_local(async move {
            let mut next = Some(first);
            while let Some(save) = next.take() {
                let result = save_board_configs(&api_ctx.client, &save.board_id, &save.body).await;
                if let Err(err) = result {
                    console::error!("board save failed", save.board_id, err.to_string());
                }
                next = saves.borrow_mut().settle();
            }
        });
    }
}

#[hook]
fn use_board(id: AttrValue) -> BoardHandle {
    let api_ctx = use_context::<ApiCtx>();
    let model = use_mut_ref(DashboardModel::default);
    let saves = use_mut_ref(SaveQueue::default);
    let rerender = use_force_update();
    {
        let model = model.clone();
        let rerender = rerender.clone();
        use_effect_with_deps(
            move |id: &AttrValue| {
                let key = Some(id.to_string()).filter(|id| !id.is_empty());
                if let Some(api_ctx) = api_ctx {
                    if let Some(ticket) = model.borrow_mut().request_if_changed(key) {
                        rerender.force_update();
                        yew::platform::spawn_local(async move {
                            let result = fetch_board(&api_ctx.client, ticket.key())
                                .await
                                .map(|board| {
                                    let (view, error) = BoardView::from_board(board);
                                    if let Some(err) = error {
                                        console::error!(
                                            "board configuration unreadable",
                                            err.to_string()
                                        );
                                    }
                                    Some(view)
                                });
                            match model.borrow_mut().settle(&ticket, result) {
                                SettleOutcome::Applied => {}
                                SettleOutcome::Failed(err) => {
                                    console::error!("board request failed", err.to_string());
                                }
                                SettleOutcome::Discarded => {
                                    console::log!("discarded stale board response");
                                }
                            }
                            rerender.force_update();
                        });
                    }
                }
                || ()
            },
            id,
        );
    }
    BoardHandle {
        model,
        saves,
        rerender,
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct DashboardPageProps {
    pub id: AttrValue,
}

#[function_component(DashboardPage)]
pub(crate) fn dashboard_page(props: &DashboardPageProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let board = use_board(props.id.clone());
    let range = use_state(TimeRange::default);
    let step = use_state(|| None::<u32>);

    let (view, loading) = board.snapshot();
    let title = view
        .as_ref()
        .map(|view| view.board.name.clone())
        .unwrap_or_default();

    let range_options = TimeRange::presets()
        .into_iter()
        .map(|(key, preset)| {
            let label = bundle.text(key, key);
            (AttrValue::from(preset.as_value()), AttrValue::from(label))
        })
        .collect::<Vec<_>>();
    let step_options = STEP_OPTIONS
        .into_iter()
        .map(|option| match option {
            Some(seconds) => (
                AttrValue::from(seconds.to_string()),
                AttrValue::from(format!("{seconds}s")),
            ),
            None => (AttrValue::from(""), AttrValue::from(bundle.text("step.auto", "Auto"))),
        })
        .collect::<Vec<_>>();
    let on_range = {
        let range = range.clone();
        Callback::from(move |value: AttrValue| {
            if let Some(next) = TimeRange::from_value(&value) {
                range.set(next);
            }
        })
    };
    let on_step = {
        let step = step.clone();
        Callback::from(move |value: AttrValue| step.set(value.parse::<u32>().ok()))
    };

    let body = match view {
        None if loading => html! {
            <div class="col-span-full flex justify-center py-16">
                <span class="loading loading-spinner loading-md"
                    aria-label={bundle.text("dashboard.loading", "Loading dashboard")}></span>
            </div>
        },
        None => Html::default(),
        Some(view) if view.config.panels.is_empty() => html! {
            <p class="col-span-full py-16 text-center text-base-content/60">
                {bundle.text("dashboard.empty", "This dashboard has no panels yet.")}
            </p>
        },
        Some(view) => {
            let bindings = Rc::new(view.bindings());
            let board_id = props.id.clone();
            view.config
                .panels
                .iter()
                .map(|panel| {
                    let span = panel_span(panel);
                    let panel_id = panel.id.clone();
                    let on_clone = {
                        let board = board.clone();
                        let api_ctx = api_ctx.clone();
                        let board_id = board_id.clone();
                        let panel_id = panel_id.clone();
                        Callback::from(move |()| {
                            board.edit(api_ctx.as_ref(), &board_id, |config| {
                                clone_panel(config, &panel_id, Uuid::new_v4().to_string())
                                    .is_some()
                            });
                        })
                    };
                    let on_delete = {
                        let board = board.clone();
                        let api_ctx = api_ctx.clone();
                        let board_id = board_id.clone();
                        let panel_id = panel_id.clone();
                        let prompt = bundle.text("panel.confirm_delete", "Delete this panel?");
                        Callback::from(move |()| {
                            if gloo::dialogs::confirm(&prompt) {
                                board.edit(api_ctx.as_ref(), &board_id, |config| {
                                    remove_panel(config, &panel_id)
                                });
                            }
                        })
                    };
                    let on_share = navigate(
                        navigator.clone(),
                        Route::SharedPanel {
                            id: board_id.to_string(),
                            panel_id: panel_id.clone(),
                        },
                    );
                    let on_edit = navigate(
                        navigator.clone(),
                        Route::PanelEditor {
                            id: board_id.to_string(),
                            panel_id: panel_id.clone(),
                        },
                    );
                    html! {
                        <div key={panel_id.clone()} class="h-72"
                            style={format!("grid-column: span {span} / span {span};")}>
                            <PanelRenderer
                                dashboard_id={board_id.clone()}
                                id={AttrValue::from(panel_id.clone())}
                                panel={Rc::new(panel.clone())}
                                range={*range}
                                step={*step}
                                kind={AttrValue::from(panel.kind.clone())}
                                bindings={Rc::clone(&bindings)}
                                on_clone={on_clone}
                                on_share={on_share}
                                on_edit={on_edit}
                                on_delete={on_delete}
                            />
                        </div>
                    }
                })
                .collect::<Html>()
        }
    };

    html! {
        <section class="space-y-4">
            <div class="flex flex-wrap items-center gap-3">
                <h1 class="text-lg font-medium flex-1">
                    {title}
                </h1>
                {loading.then(|| html! {
                    <span class="loading loading-spinner loading-sm"></span>
                }).unwrap_or_default()}
                <Select
                    options={range_options}
                    value={AttrValue::from((*range).as_value())}
                    label={AttrValue::from(bundle.text("dashboard.range", "Time range"))}
                    onchange={on_range}
                />
                <Select
                    options={step_options}
                    value={AttrValue::from((*step).map(|s| s.to_string()).unwrap_or_default())}
                    label={AttrValue::from(bundle.text("dashboard.step", "Step"))}
                    onchange={on_step}
                />
            </div>
            <div class="grid gap-4"
                style={format!("grid-template-columns: repeat({GRID_COLUMNS}, minmax(0, 1fr));")}>
                {body}
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct SharedPanelPageProps {
    pub id: AttrValue,
    pub panel_id: AttrValue,
}

/// One panel of a board in preview mode: always fetching, menu reduced to
/// the drill-down link.
#[function_component(SharedPanelPage)]
pub(crate) fn shared_panel_page(props: &SharedPanelPageProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let board = use_board(props.id.clone());
    let (view, loading) = board.snapshot();
    let on_back = navigate(
        use_navigator(),
        Route::Dashboard {
            id: props.id.to_string(),
        },
    )
    .reform(|_: MouseEvent| ());

    let panel = view.as_ref().and_then(|view| {
        view.find_panel(&props.panel_id)
            .map(|panel| (Rc::new(panel.clone()), Rc::new(view.bindings())))
    });
    let body = match panel {
        Some((panel, bindings)) => {
            let kind = AttrValue::from(panel.kind.clone());
            html! {
                <div class="h-[32rem]">
                    <PanelRenderer
                        dashboard_id={props.id.clone()}
                        id={props.panel_id.clone()}
                        {kind}
                        {panel}
                        range={TimeRange::default()}
                        {bindings}
                        is_preview={true}
                    />
                </div>
            }
        }
        None if loading => html! {
            <span class="loading loading-spinner loading-md"></span>
        },
        None => html! {
            <p class="text-base-content/60">{bundle.text("panel.not_found", "Panel not found")}</p>
        },
    };

    html! {
        <section class="space-y-4">
            <div class="flex items-center gap-2">
                <button type="button" class="btn btn-ghost btn-sm" onclick={on_back}>
                    {bundle.text("dashboard.back", "Back to dashboard")}
                </button>
                <h1 class="text-lg font-medium">{bundle.text("dashboard.shared", "Shared panel")}</h1>
            </div>
            {body}
        </section>
    }
}

fn navigate(navigator: Option<Navigator>, route: Route) -> Callback<()> {
    Callback::from(move |()| {
        if let Some(navigator) = &navigator {
            navigator.push(&route);
        }
    })
}
