use soniy_admin_shared::audio_review::{Progress, ProgressPhase};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProgressBarProps {
    pub progress: Progress,
}

#[function_component(ProgressBar)]
pub fn progress_bar(props: &ProgressBarProps) -> Html {
    let progress = &props.progress;
    let phase_class = match progress.phase {
        ProgressPhase::Running => "progress-running",
        ProgressPhase::Succeeded => "progress-success",
        ProgressPhase::Failed => "progress-error",
    };
    html! {
        <div class={classes!("progress-container", phase_class)}>
            <div class="progress-track">
                <div class="progress-fill" style={format!("width:{}%;", progress.percent)} />
            </div>
            <p class="progress-text">{ progress.text.clone() }</p>
        </div>
    }
}
