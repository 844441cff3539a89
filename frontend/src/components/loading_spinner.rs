use yew::prelude::*;

use crate::i18n::current::common as t;

const SPINNER_SIZE_PX: u32 = 40;

#[function_component(LoadingSpinner)]
pub fn loading_spinner() -> Html {
    let spinner_style = format!("--spinner-size:{SPINNER_SIZE_PX}px;");

    html! {
        <div
            class={classes!("flex", "items-center", "justify-center", "p-6")}
            role="status"
            aria-live="polite"
            aria-busy="true"
        >
            <div
                style={spinner_style}
                class={classes!(
                    "w-[var(--spinner-size)]",
                    "h-[var(--spinner-size)]",
                    "rounded-full",
                    "border-[3px]",
                    "border-transparent",
                    "bg-[conic-gradient(var(--primary),transparent)]",
                    "[mask:radial-gradient(farthest-side,transparent_calc(100%-4px),#000_calc(100%-3px))]",
                    "animate-[spin_0.9s_linear_infinite]"
                )}
            />
            <span class={classes!("sr-only")}>{ t::LOADING }</span>
        </div>
    }
}
