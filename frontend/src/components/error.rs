use leptos::*;

use crate::api::ApiError;

/// Inline error banner local to the triggering affordance; one failed
/// fetch must not take unrelated sections down with it.
#[component]
pub fn ErrorBanner(#[prop(into)] error: Signal<Option<ApiError>>) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some()>
            <div class="rounded-md border border-action-danger-bg bg-action-danger-bg/10 px-4 py-3 text-sm text-action-danger-bg" role="alert">
                {move || error.get().map(|e| e.error)}
            </div>
        </Show>
    }
}

#[component]
pub fn Notice(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class="rounded-md border border-action-primary-bg bg-action-primary-bg/10 px-4 py-3 text-sm text-fg" role="status">
                {move || message.get()}
            </div>
        </Show>
    }
}
