use leptos::prelude::*;
use leptos_ui::clx;
use tw_merge::tw_merge;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlertTone {
    #[default]
    Neutral,
    Destructive,
    Success,
}

impl AlertTone {
    fn class(self) -> &'static str {
        match self {
            Self::Neutral => "bg-card text-card-foreground",
            Self::Destructive => "border-destructive/30 text-destructive",
            Self::Success => "border-green-600/30 text-green-700",
        }
    }
}

#[component]
pub fn Alert(
    #[prop(optional)] tone: AlertTone,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "relative w-full rounded-lg border px-4 py-3 text-sm",
        tone.class(),
        class
    );

    view! {
        <div data-name="Alert" role="alert" class=merged_class>
            {children()}
        </div>
    }
}

mod components {
    use super::*;
    clx! {AlertDescription, p, "text-sm [&_p]:leading-relaxed"}
}

pub use components::*;
