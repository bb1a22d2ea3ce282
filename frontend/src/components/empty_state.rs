use leptos::*;

#[component]
pub fn EmptyState(
    #[prop(into)] title: String,
    #[prop(optional, into)] message: String,
) -> impl IntoView {
    view! {
        <div class="text-center py-12">
            <h3 class="text-xl font-medium text-fg mb-2">{title}</h3>
            {(!message.is_empty())
                .then(|| view! { <p class="text-fg-muted">{message}</p> })}
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn empty_state_renders_title_and_message() {
        let html = render_to_string(|| {
            view! {
                <EmptyState
                    title="All Caught Up!"
                    message="No pending leave requests require your attention"
                />
            }
        });
        assert!(html.contains("All Caught Up!"));
        assert!(html.contains("No pending leave requests"));
    }
}
