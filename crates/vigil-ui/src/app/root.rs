//! Root component and wasm bootstrap.
//!
//! # Design
//! - One API client and one translation bundle per boot, shared via context.
//! - Business groups load once at boot; the persisted choice wins when it is
//!   still offered, and every later selection is persisted.

use crate::app::Route;
use crate::app::api::{ApiCtx, fetch_business_groups};
use crate::app::preferences::{
    api_base_url, load_access_token, load_business_group, load_locale, persist_business_group,
    persist_locale,
};
use crate::components::placeholder::Placeholder;
use crate::components::shell::AppShell;
use crate::core::store::{AppStore, select_business_group, set_business_groups};
use crate::features::dashboard::view::{DashboardPage, SharedPanelPage};
use crate::features::tasks::view::TaskDetailPage;
use crate::i18n::{Locale, TranslationBundle};
use gloo::console;
use gloo::utils::document;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

#[function_component(VigilApp)]
fn vigil_app() -> Html {
    let locale = use_state(load_locale);
    let dispatch = Dispatch::<AppStore>::new();
    let api_ctx = use_memo(|_| ApiCtx::new(api_base_url(), load_access_token()), ());
    let bundle = {
        let locale = *locale;
        use_memo(move |_| TranslationBundle::new(locale), locale)
    };
    let groups = use_selector(|store: &AppStore| store.business.groups.clone());
    let current_group = use_selector(|store: &AppStore| store.business.current);

    {
        let locale = *locale;
        use_effect_with_deps(
            move |_| {
                persist_locale(locale);
                apply_document_locale(locale);
                || ()
            },
            locale,
        );
    }
    {
        let dispatch = dispatch.clone();
        let api_ctx = (*api_ctx).clone();
        use_effect_with_deps(
            move |_| {
                yew::platform::spawn_local(async move {
                    match fetch_business_groups(&api_ctx.client).await {
                        Ok(groups) => {
                            let preferred = load_business_group();
                            let mut groups = Some(groups);
                            dispatch.reduce_mut(|store| {
                                if let Some(groups) = groups.take() {
                                    set_business_groups(&mut store.business, groups, preferred);
                                }
                            });
                            persist_business_group(dispatch.get().business.current);
                        }
                        Err(err) => {
                            console::error!("business group request failed", err.to_string());
                        }
                    }
                });
                || ()
            },
            (),
        );
    }

    let on_group_change = {
        let dispatch = dispatch.clone();
        Callback::from(move |id: i64| {
            let mut changed = false;
            dispatch.reduce_mut(|store| {
                changed = select_business_group(&mut store.business, id);
            });
            if changed {
                persist_business_group(Some(id));
            }
        })
    };
    let on_locale_change = {
        let locale = locale.clone();
        Callback::from(move |next: Locale| locale.set(next))
    };

    let bundle_routes = bundle.clone();

    html! {
        <ContextProvider<ApiCtx> context={(*api_ctx).clone()}>
            <ContextProvider<TranslationBundle> context={(*bundle).clone()}>
                <BrowserRouter>
                    <AppShell
                        groups={(*groups).clone()}
                        current_group={*current_group}
                        {on_group_change}
                        locale={*locale}
                        {on_locale_change}
                    >
                        <Switch<Route> render={move |route| switch(route, &bundle_routes)} />
                    </AppShell>
                </BrowserRouter>
            </ContextProvider<TranslationBundle>>
        </ContextProvider<ApiCtx>>
    }
}

fn switch(route: Route, bundle: &TranslationBundle) -> Html {
    let placeholder = |key: &str, title: &str, body: &str| {
        html! {
            <Placeholder
                title={bundle.text(&format!("placeholder.{key}_title"), title)}
                body={bundle.text(&format!("placeholder.{key}_body"), body)}
            />
        }
    };
    match route {
        Route::Home => html! { <Redirect<Route> to={Route::Dashboards} /> },
        Route::Dashboards => placeholder(
            "dashboards",
            "Dashboards",
            "Open a dashboard from its link to view its panels.",
        ),
        Route::Dashboard { id } => html! { <DashboardPage id={id} /> },
        Route::SharedPanel { id, panel_id } => html! {
            <SharedPanelPage id={id} panel_id={panel_id} />
        },
        Route::PanelEditor { .. } => placeholder(
            "editor",
            "Panel editor",
            "Panels are edited in the dashboard editor.",
        ),
        Route::Tasks => placeholder(
            "tasks",
            "Job tasks",
            "The task list lives in the task service console.",
        ),
        Route::TaskAdd => placeholder(
            "task_add",
            "New task",
            "The task creation form lives in the task service console.",
        ),
        Route::TaskDetail { id } => html! { <TaskDetailPage id={id} /> },
        Route::NotFound => placeholder(
            "not_found",
            "Not found",
            "Use navigation to return to a supported view.",
        ),
    }
}

fn apply_document_locale(locale: Locale) {
    if let Some(root) = document().document_element() {
        if let Err(err) = root.set_attribute("lang", locale.tag()) {
            console::warn!("failed to set document language", err);
        }
    }
}

/// Mount the console on `#root`, or on `<body>` when the element is missing.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = document().get_element_by_id("root") {
        yew::Renderer::<VigilApp>::with_root(root).render();
    } else {
        yew::Renderer::<VigilApp>::new().render();
    }
}
