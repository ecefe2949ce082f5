use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct PlaceholderProps {
    pub title: AttrValue,
    pub body: AttrValue,
}

#[function_component(Placeholder)]
pub(crate) fn placeholder(props: &PlaceholderProps) -> Html {
    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">{props.title.clone()}</h2>
                <p class="text-base-content/70">{props.body.clone()}</p>
            </div>
        </div>
    }
}
