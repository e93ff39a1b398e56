use dioxus::prelude::*;

use crate::vm::ProgressBarVm;

#[component]
pub fn ProgressBar(bar: ProgressBarVm) -> Element {
    rsx! {
        div { class: if bar.complete { "progress complete" } else { "progress" },
            div { class: "progress-track",
                div { class: "progress-fill", style: "{bar.width_style}" }
            }
            span { class: "progress-label", "{bar.percentage}% · {bar.label}" }
        }
    }
}

#[component]
pub fn WarningBanner(message: String) -> Element {
    rsx! {
        div { class: "banner banner-warning", role: "alert", "{message}" }
    }
}
