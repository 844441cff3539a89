use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsCardProps {
    pub icon: AttrValue,
    pub value: AttrValue,
    pub label: AttrValue,
}

#[function_component(StatsCard)]
pub fn stats_card(props: &StatsCardProps) -> Html {
    html! {
        <div class="stats-card" role="status">
            <span class="stats-card-icon" aria-hidden="true">{ props.icon.clone() }</span>
            <strong class="stats-card-value">{ props.value.clone() }</strong>
            <span class="stats-card-label">{ props.label.clone() }</span>
        </div>
    }
}
