//! Injects pre-rendered HTML (already escaped by the markdown renderer).

use gloo::utils::document;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct RichTextProps {
    pub html: AttrValue,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(RichText)]
pub(crate) fn rich_text(props: &RichTextProps) -> Html {
    let node = use_memo(
        |html: &AttrValue| {
            document().create_element("div").ok().map(|element| {
                element.set_inner_html(html);
                element
            })
        },
        props.html.clone(),
    );
    match (*node).clone() {
        Some(element) => html! {
            <div class={classes!("prose", "prose-sm", props.class.clone())}>
                {Html::VRef(element.into())}
            </div>
        },
        None => Html::default(),
    }
}
