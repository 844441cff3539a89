use soniy_admin_shared::views::StatusBadge as Badge;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusBadgeProps {
    pub badge: Badge,
}

#[function_component(StatusBadge)]
pub fn status_badge(props: &StatusBadgeProps) -> Html {
    let badge = &props.badge;
    html! {
        <span class={classes!("status-badge", (!badge.class.is_empty()).then_some(badge.class))}>
            { badge.text() }
        </span>
    }
}
