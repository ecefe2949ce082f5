//! Panel hooks: viewport tracking and the series query layer.

use crate::app::api::ApiCtx;
use crate::core::request::{FetchModel, SettleOutcome};
use crate::features::panels::api::query_range;
use crate::features::panels::query::{SeriesQuery, TargetBatch, plan_range_requests};
use crate::models::Series;
use futures::future::join_all;
use gloo::console;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry};
use yew::prelude::*;

/// Output of [`use_series_query`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SeriesState {
    /// Last committed series.
    pub series: Rc<Vec<Series>>,
    /// Whether the latest request is in flight.
    pub loading: bool,
}

/// Track whether the element behind `node` intersects the viewport.
///
/// `attached` says whether the caller renders the element this pass; the
/// observer is re-created whenever it flips.
#[hook]
pub(crate) fn use_in_viewport(node: NodeRef, attached: bool) -> bool {
    let visible = use_state_eq(|| false);
    {
        let visible = visible.clone();
        use_effect_with_deps(
            move |(node, attached): &(NodeRef, bool)| {
                let mut handle = None;
                let element = attached.then(|| node.cast::<Element>()).flatten();
                if element.is_none() {
                    visible.set(false);
                }
                if let Some(element) = element {
                    let setter = visible.clone();
                    let callback = Closure::<dyn FnMut(js_sys::Array)>::new(
                        move |entries: js_sys::Array| {
                            for entry in entries.iter() {
                                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                                    setter.set(entry.is_intersecting());
                                }
                            }
                        },
                    );
                    match IntersectionObserver::new(callback.as_ref().unchecked_ref()) {
                        Ok(observer) => {
                            observer.observe(&element);
                            handle = Some((observer, callback));
                        }
                        Err(err) => {
                            console::warn!("viewport observer unavailable", err);
                            visible.set(true);
                        }
                    }
                }
                move || {
                    if let Some((observer, _callback)) = handle {
                        observer.disconnect();
                    }
                }
            },
            (node, attached),
        );
    }
    *visible
}

/// Resolve series for `query` while `enabled`.
///
/// Each change of the query, and each transition to enabled, issues a new
/// generation of target requests; responses from older generations are dropped.
#[hook]
pub(crate) fn use_series_query(query: SeriesQuery, enabled: bool) -> SeriesState {
    let api_ctx = use_context::<ApiCtx>();
    let model = use_mut_ref(FetchModel::<SeriesQuery, Rc<Vec<Series>>>::default);
    let rerender = use_force_update();
    {
        let model = model.clone();
        let rerender = rerender.clone();
        use_effect_with_deps(
            move |(query, enabled): &(SeriesQuery, bool)| {
                if let (true, Some(api_ctx)) = (*enabled, api_ctx) {
                    let planned = plan_range_requests(query, now_secs());
                    let ticket = model.borrow_mut().request(query.clone());
                    rerender.force_update();
                    let client = Rc::clone(&api_ctx.client);
                    yew::platform::spawn_local(async move {
                        let results = join_all(planned.into_iter().map(|request| {
                            let client = Rc::clone(&client);
                            async move {
                                let result = query_range(&client, &request).await;
                                (request, result)
                            }
                        }))
                        .await;
                        let batch = TargetBatch::collect(results);
                        for failure in batch.failures() {
                            console::error!(
                                "series query failed",
                                failure.ref_id.clone(),
                                failure.error.to_string()
                            );
                        }
                        let outcome = model
                            .borrow_mut()
                            .settle(&ticket, batch.into_result().map(Rc::new));
                        if matches!(outcome, SettleOutcome::Discarded) {
                            console::log!("discarded stale series response");
                        }
                        rerender.force_update();
                    });
                }
                || ()
            },
            (query, enabled),
        );
    }
    let model = model.borrow();
    SeriesState {
        series: Rc::clone(model.value()),
        loading: model.loading(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn now_secs() -> i64 {
    (js_sys::Date::now() / 1_000.0) as i64
}
