use leptos::*;

#[component]
pub fn TextField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(optional, into)] input_type: Option<String>,
    #[prop(optional, into)] placeholder: String,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    let input_type = input_type.unwrap_or_else(|| "text".to_string());
    view! {
        <div>
            <label class="block text-sm font-medium text-fg-muted mb-2">
                {label}
                {required.then(|| view! { <span class="text-action-danger-bg">" *"</span> })}
            </label>
            <input
                type=input_type
                class="block w-full rounded-md border border-border bg-surface px-3 py-2 text-sm text-fg focus:border-action-primary-bg focus:outline-none"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
pub fn SelectField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(into)] options: MaybeSignal<Vec<(String, String)>>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder_label = if placeholder.is_empty() {
        "All".to_string()
    } else {
        placeholder
    };
    view! {
        <div>
            <label class="block text-sm font-medium text-fg-muted mb-2">{label}</label>
            <select
                class="block w-full rounded-md border border-border bg-surface px-3 py-2 text-sm text-fg focus:border-action-primary-bg focus:outline-none"
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                <option value="">{placeholder_label}</option>
                <For
                    each=move || options.get()
                    key=|(option_value, _)| option_value.clone()
                    children=move |(option_value, option_label)| {
                        view! { <option value=option_value>{option_label}</option> }
                    }
                />
            </select>
        </div>
    }
}

#[component]
pub fn TextAreaField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(default = 3)] rows: u32,
    #[prop(optional, into)] placeholder: String,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm font-medium text-fg-muted mb-2">
                {label}
                {required.then(|| view! { <span class="text-action-danger-bg">" *"</span> })}
            </label>
            <textarea
                rows=rows
                class="block w-full rounded-md border border-border bg-surface px-3 py-2 text-sm text-fg focus:border-action-primary-bg focus:outline-none"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            ></textarea>
        </div>
    }
}

#[component]
pub fn DateField(
    #[prop(into)] label: String,
    value: RwSignal<String>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <TextField label=label value=value input_type="date" required=required/>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn text_field_renders_label_and_required_marker() {
        let html = render_to_string(|| {
            let value = create_rw_signal(String::new());
            view! { <TextField label="Reason" value=value required=true/> }
        });
        assert!(html.contains("Reason"));
        assert!(html.contains(" *"));
    }

    #[test]
    fn select_field_renders_placeholder_and_options() {
        let html = render_to_string(|| {
            let value = create_rw_signal(String::new());
            let options = vec![("vacation".to_string(), "Vacation".to_string())];
            view! {
                <SelectField
                    label="Type"
                    value=value
                    options=options
                    placeholder="All Types"
                />
            }
        });
        assert!(html.contains("All Types"));
        assert!(html.contains("Vacation"));
    }
}
