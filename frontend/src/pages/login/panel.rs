use leptos::*;

use super::view_model::use_login_view_model;
use crate::components::{error::ErrorBanner, forms::TextField};

#[component]
pub fn LoginPanel() -> impl IntoView {
    let vm = use_login_view_model();
    let pending = vm.login_action.pending();
    let error = vm.error.read_only();
    let submit = vm.on_submit();
    let email = vm.form.email;
    let password = vm.form.password;

    view! {
        <div class="min-h-screen bg-surface flex items-center justify-center p-4">
            <div class="w-full max-w-md bg-surface-elevated shadow rounded-lg border border-border p-8 space-y-6">
                <div class="text-center">
                    <div class="mx-auto h-10 w-10 bg-action-primary-bg rounded-lg flex items-center justify-center">
                        <span class="text-action-primary-text font-bold">"HR"</span>
                    </div>
                    <h1 class="mt-4 text-2xl font-bold text-fg">"Sign in to Staffboard"</h1>
                    <p class="mt-1 text-sm text-fg-muted">"HR management dashboard"</p>
                </div>
                <ErrorBanner error=Signal::derive(move || error.get())/>
                <form
                    class="space-y-4"
                    on:submit=move |ev| {
                        ev.prevent_default();
                        submit();
                    }
                >
                    <TextField
                        label="Email"
                        value=email
                        input_type="email"
                        placeholder="you@company.com"
                        required=true
                    />
                    <TextField
                        label="Password"
                        value=password
                        input_type="password"
                        required=true
                    />
                    <button
                        type="submit"
                        class="w-full inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
                        disabled=move || pending.get()
                    >
                        {move || if pending.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn login_panel_renders_form_fields() {
        let html = render_to_string(|| view! { <LoginPanel/> });
        assert!(html.contains("Sign in to Staffboard"));
        assert!(html.contains("Email"));
        assert!(html.contains("Password"));
    }
}
