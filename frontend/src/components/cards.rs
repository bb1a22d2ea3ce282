use leptos::*;

#[component]
pub fn Card(children: Children) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated overflow-hidden shadow rounded-lg border border-border">
            <div class="px-4 py-5 sm:p-6">{children()}</div>
        </div>
    }
}

#[component]
pub fn CardHeader(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: String,
) -> impl IntoView {
    view! {
        <div class="mb-4">
            <h3 class="text-lg leading-6 font-semibold text-fg">{title}</h3>
            {(!subtitle.is_empty())
                .then(|| view! { <p class="text-sm text-fg-muted mt-1">{subtitle}</p> })}
        </div>
    }
}

#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    #[prop(into)] value: MaybeSignal<String>,
    #[prop(optional, into)] subtitle: String,
    #[prop(optional, into)] accent: String,
) -> impl IntoView {
    let value_class = if accent.is_empty() {
        "text-3xl font-bold text-fg mt-1".to_string()
    } else {
        format!("text-3xl font-bold mt-1 {accent}")
    };
    view! {
        <div class="bg-surface-elevated shadow rounded-lg border border-border px-4 py-5">
            <p class="text-sm font-medium text-fg-muted">{label}</p>
            <p class=value_class>{move || value.get()}</p>
            {(!subtitle.is_empty())
                .then(|| view! { <p class="text-xs text-fg-muted mt-2">{subtitle}</p> })}
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn stat_card_renders_label_value_and_subtitle() {
        let html = render_to_string(|| {
            view! {
                <StatCard label="Pending Approval" value="5" subtitle="Needs attention"/>
            }
        });
        assert!(html.contains("Pending Approval"));
        assert!(html.contains("5"));
        assert!(html.contains("Needs attention"));
    }
}
