//! Task detail page.
//!
//! # Design
//! - Fetch when `(group, task id)` changes and both are known.
//! - Only the latest request may commit; failures keep what is shown.

use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::core::request::SettleOutcome;
use crate::core::store::{AppStore, select_current_group_id, select_missing_group};
use crate::features::tasks::api::fetch_task_detail;
use crate::features::tasks::state::{CloneTaskQuery, TaskDetailModel, TaskKey, TaskView};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use gloo::console;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub(crate) struct TaskDetailPageProps {
    pub id: AttrValue,
}

#[function_component(TaskDetailPage)]
pub(crate) fn task_detail_page(props: &TaskDetailPageProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str, default: &str| bundle.text(key, default);
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let group_id = use_selector(|store: &AppStore| select_current_group_id(store));
    let missing_group = use_selector(|store: &AppStore| select_missing_group(store));
    let model = use_mut_ref(TaskDetailModel::default);
    let rerender = use_force_update();

    {
        let model = model.clone();
        let rerender = rerender.clone();
        let key = TaskKey::from_parts(*group_id, Some(props.id.as_str()));
        use_effect_with_deps(
            move |key: &Option<TaskKey>| {
                if let Some(api_ctx) = api_ctx {
                    if let Some(ticket) = model.borrow_mut().request_if_changed(key.clone()) {
                        rerender.force_update();
                        yew::platform::spawn_local(async move {
                            let key = ticket.key();
                            let result =
                                fetch_task_detail(&api_ctx.client, key.group_id, &key.task_id)
                                    .await;
                            let outcome = model.borrow_mut().settle(&ticket, result.map(Some));
                            match outcome {
                                SettleOutcome::Applied => {}
                                SettleOutcome::Failed(err) => {
                                    console::error!("task detail request failed", err.to_string());
                                }
                                SettleOutcome::Discarded => {
                                    console::log!("discarded stale task detail response");
                                }
                            }
                            rerender.force_update();
                        });
                    }
                }
                || ()
            },
            key,
        );
    }

    let (view, loading) = {
        let model = model.borrow();
        let view = model
            .value()
            .as_ref()
            .map(|record| TaskView::from_record(record, local_offset_minutes()))
            .unwrap_or_default();
        (view, model.loading())
    };

    let on_clone = {
        let navigator = navigator.clone();
        let task = props.id.to_string();
        Callback::from(move |_: MouseEvent| {
            if let Some(navigator) = &navigator {
                let query = CloneTaskQuery { task: task.clone() };
                if let Err(err) = navigator.push_with_query(&Route::TaskAdd, &query) {
                    console::error!("navigation failed", err.to_string());
                }
            }
        })
    };
    let on_back = Callback::from(move |_: MouseEvent| {
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Tasks);
        }
    });

    let control = [
        (t("task.account", "Account"), view.account.clone()),
        (t("task.batch", "Batch"), view.batch.clone()),
        (t("task.tolerance", "Tolerance"), view.tolerance.clone()),
        (t("task.timeout", "Timeout"), view.timeout.clone()),
    ];
    let control_len = control.len();

    html! {
        <section class="space-y-4">
            <div class="flex items-center gap-2">
                <button type="button" class="btn btn-ghost btn-sm" onclick={on_back.clone()}
                    aria-label={t("task.back", "Back")}>{"←"}</button>
                <h1 class="text-lg font-medium">{t("task.history", "Execution history")}</h1>
            </div>
            <div class="card bg-base-100 shadow">
                <div class="card-body gap-4">
                    <div class="flex items-center gap-2">
                        <h2 class="card-title">{view.title.clone()}</h2>
                        {loading.then(|| html! {
                            <span class="loading loading-spinner loading-sm"></span>
                        }).unwrap_or_default()}
                    </div>
                    {(*missing_group).then(|| html! {
                        <p class="text-sm text-base-content/60">
                            {t("task.no_group", "Select a business group to view this task.")}
                        </p>
                    }).unwrap_or_default()}
                    <table class={classes!("table", "table-sm", loading.then_some("opacity-60"))}>
                        <colgroup>
                            <col class="w-32" />
                            <col />
                        </colgroup>
                        <tbody>
                            <tr>
                                <th>{t("task.title", "Title")}</th>
                                <td>{view.title.clone()}</td>
                            </tr>
                            <tr>
                                <th>{t("task.creator", "Creator")}</th>
                                <td>{view.creator_line.clone()}</td>
                            </tr>
                            <tr>
                                <th>{t("task.control_params", "Control params")}</th>
                                <td>
                                    {for control.into_iter().enumerate().map(|(index, (label, value))| html! {
                                        <>
                                            <span>{format!("{label}: {value}")}</span>
                                            {(index + 1 < control_len).then(|| html! {
                                                <span class="divider divider-horizontal mx-1 inline-flex"></span>
                                            }).unwrap_or_default()}
                                        </>
                                    })}
                                </td>
                            </tr>
                            <tr>
                                <th>{t("task.script", "Script")}</th>
                                <td>
                                    <pre class="rounded-box bg-neutral text-neutral-content overflow-x-auto p-3 text-xs">
                                        <code class="hljs language-bash">{view.script.clone()}</code>
                                    </pre>
                                </td>
                            </tr>
                            <tr>
                                <th>{t("task.script_args", "Script args")}</th>
                                <td>{view.args.clone()}</td>
                            </tr>
                            <tr>
                                <th>{t("task.pause", "Pause")}</th>
                                <td>{view.pause.clone()}</td>
                            </tr>
                            <tr>
                                <th>{t("task.host_list", "Host list")}</th>
                                <td>
                                    {for view.hosts.iter().map(|host| html! {
                                        <div key={host.clone()}>{host.clone()}</div>
                                    })}
                                </td>
                            </tr>
                        </tbody>
                    </table>
                    <div class="card-actions">
                        <button type="button" class="btn btn-primary btn-sm" onclick={on_clone}>
                            {t("task.clone_new", "Clone as new task")}
                        </button>
                        <button type="button" class="btn btn-sm" onclick={on_back}>
                            {t("task.back", "Back")}
                        </button>
                    </div>
                </div>
            </div>
        </section>
    }
}

/// Browser offset in minutes east of UTC.
#[allow(clippy::cast_possible_truncation)]
fn local_offset_minutes() -> i32 {
    -(js_sys::Date::new_0().get_timezone_offset() as i32)
}
