//! Top-level layout: navigation, business-group selector, and locale selector.
//!
//! # Design
//! - Keep presentation here; selection state lives with the caller.
//! - Emit selections through callbacks; persistence happens in the app root.

use crate::app::Route;
use crate::components::select::Select;
use crate::i18n::{DEFAULT_LOCALE, Locale, TranslationBundle};
use crate::models::BusinessGroup;
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Properties, PartialEq)]
pub(crate) struct ShellProps {
    pub children: Children,
    pub groups: Vec<BusinessGroup>,
    pub current_group: Option<i64>,
    pub on_group_change: Callback<i64>,
    pub locale: Locale,
    pub on_locale_change: Callback<Locale>,
}

#[function_component(AppShell)]
pub(crate) fn app_shell(props: &ShellProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let t = |key: &str, default: &str| bundle.text(key, default);

    let group_options: Vec<(AttrValue, AttrValue)> = props
        .groups
        .iter()
        .map(|group| (group.id.to_string().into(), group.name.clone().into()))
        .collect();
    let on_group = {
        let cb = props.on_group_change.clone();
        Callback::from(move |value: AttrValue| {
            if let Ok(id) = value.parse::<i64>() {
                cb.emit(id);
            }
        })
    };
    let locale_options: Vec<(AttrValue, AttrValue)> = Locale::ALL
        .into_iter()
        .map(|locale| (locale.tag().into(), locale.label().into()))
        .collect();
    let on_locale = {
        let cb = props.on_locale_change.clone();
        Callback::from(move |value: AttrValue| {
            if let Some(locale) = Locale::negotiate(&value) {
                cb.emit(locale);
            }
        })
    };

    html! {
        <div class="min-h-screen bg-base-200">
            <header class="navbar bg-base-100 shadow-sm gap-4 px-4">
                <div class="flex-1 gap-4">
                    <Link<Route> to={Route::Home} classes="text-lg font-semibold">
                        {t("nav.brand", "Vigil")}
                    </Link<Route>>
                    <nav class="flex gap-2">
                        <Link<Route> to={Route::Dashboards} classes="btn btn-ghost btn-sm">
                            {t("nav.dashboards", "Dashboards")}
                        </Link<Route>>
                        <Link<Route> to={Route::Tasks} classes="btn btn-ghost btn-sm">
                            {t("nav.tasks", "Job tasks")}
                        </Link<Route>>
                    </nav>
                </div>
                <div class="flex items-center gap-2">
                    <Select
                        label={AttrValue::from(t("nav.business_group", "Business group"))}
                        placeholder={AttrValue::from(t("nav.no_groups", "No business groups"))}
                        options={group_options}
                        value={props.current_group.map(|id| AttrValue::from(id.to_string()))}
                        disabled={props.groups.is_empty()}
                        onchange={on_group}
                    />
                    <Select
                        label={AttrValue::from(t("nav.locale", "Language"))}
                        options={locale_options}
                        value={Some(AttrValue::from(props.locale.tag()))}
                        onchange={on_locale}
                    />
                </div>
            </header>
            <main class="p-4">
                {for props.children.iter()}
            </main>
        </div>
    }
}
