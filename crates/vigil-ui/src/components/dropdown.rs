use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct DropdownProps {
    pub trigger: Html,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub trigger_class: Classes,
    #[prop_or_default]
    pub content_class: Classes,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Dropdown)]
pub(crate) fn dropdown(props: &DropdownProps) -> Html {
    html! {
        <div class={classes!("dropdown", props.class.clone())}>
            <div tabindex="0" role="button" class={classes!("cursor-pointer", props.trigger_class.clone())}>
                {props.trigger.clone()}
            </div>
            <ul
                tabindex="0"
                class={classes!(
                    "dropdown-content",
                    "menu",
                    "z-10",
                    "p-2",
                    "shadow",
                    "bg-base-200",
                    "rounded-box",
                    props.content_class.clone()
                )}
            >
                { for props.children.iter() }
            </ul>
        </div>
    }
}
