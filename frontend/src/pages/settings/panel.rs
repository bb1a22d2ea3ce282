use leptos::*;

use super::utils::ChangePasswordFormState;
use crate::api::ApiError;
use crate::components::cards::{Card, CardHeader};
use crate::components::error::{ErrorBanner, Notice};
use crate::components::forms::TextField;
use crate::components::layout::Layout;
use crate::state::auth::{use_auth, use_change_password_action};
use crate::state::theme::{use_theme, Theme};

#[component]
pub fn SettingsPage() -> impl IntoView {
    view! {
        <Layout>
            <SettingsPanel/>
        </Layout>
    }
}

#[component]
pub fn SettingsPanel() -> impl IntoView {
    let (auth, _) = use_auth();
    let theme = use_theme();
    let form = ChangePasswordFormState::new();
    let change_password_action = use_change_password_action();
    let pending = change_password_action.pending();
    let error = create_rw_signal(None::<ApiError>);
    let notice = create_rw_signal(None::<String>);

    create_effect(move |_| {
        if let Some(result) = change_password_action.value().get() {
            match result {
                Ok(message) => {
                    error.set(None);
                    form.reset();
                    notice.set(Some(if message.is_empty() {
                        "Password updated.".to_string()
                    } else {
                        message
                    }));
                }
                Err(err) => {
                    notice.set(None);
                    error.set(Some(err));
                }
            }
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        notice.set(None);
        match form.to_payload() {
            Ok(payload) => {
                error.set(None);
                change_password_action.dispatch(payload);
            }
            Err(err) => error.set(Some(err)),
        }
    };

    let user_name = move || {
        auth.get()
            .user
            .map(|user| user.name)
            .unwrap_or_else(|| "Unknown".into())
    };
    let user_email = move || auth.get().user.map(|user| user.email).unwrap_or_default();
    let user_role = move || {
        auth.get()
            .user
            .map(|user| user.role.to_string())
            .unwrap_or_default()
    };
    let theme_label = move || match theme.theme.get() {
        Theme::Light => "Switch to dark mode",
        Theme::Dark => "Switch to light mode",
    };

    view! {
        <div class="space-y-6 max-w-3xl">
            <div>
                <h1 class="text-3xl font-bold text-fg">"Settings"</h1>
                <p class="text-fg-muted mt-2">"Your profile and preferences"</p>
            </div>

            <Card>
                <CardHeader title="Profile"/>
                <div class="grid grid-cols-2 gap-4 text-sm">
                    <div>
                        <dt class="font-medium text-fg-muted">"Name"</dt>
                        <dd class="mt-1 text-fg">{user_name}</dd>
                    </div>
                    <div>
                        <dt class="font-medium text-fg-muted">"Email"</dt>
                        <dd class="mt-1 text-fg">{user_email}</dd>
                    </div>
                    <div>
                        <dt class="font-medium text-fg-muted">"Role"</dt>
                        <dd class="mt-1 text-fg capitalize">{user_role}</dd>
                    </div>
                </div>
            </Card>

            <Card>
                <CardHeader title="Appearance"/>
                <button
                    type="button"
                    class="rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg hover:bg-surface-elevated"
                    on:click=move |_| theme.toggle()
                >
                    {theme_label}
                </button>
            </Card>

            <Card>
                <CardHeader title="Change Password"/>
                <Notice message=Signal::derive(move || notice.get())/>
                <ErrorBanner error=Signal::derive(move || error.get())/>
                <form class="space-y-4 mt-2" on:submit=on_submit>
                    <TextField
                        label="Current Password"
                        value=form.current_password
                        input_type="password"
                        required=true
                    />
                    <div class="grid grid-cols-2 gap-4">
                        <TextField
                            label="New Password"
                            value=form.new_password
                            input_type="password"
                            required=true
                        />
                        <TextField
                            label="Confirm New Password"
                            value=form.confirm_password
                            input_type="password"
                            required=true
                        />
                    </div>
                    <button
                        type="submit"
                        class="rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
                        disabled=move || pending.get()
                    >
                        {move || if pending.get() { "Updating..." } else { "Update Password" }}
                    </button>
                </form>
            </Card>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::Role;
    use crate::test_support::helpers::{provide_auth, user_with_role};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn settings_panel_shows_profile_and_password_form() {
        let html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Employee)));
            view! { <SettingsPanel/> }
        });
        assert!(html.contains("Mike Employee"));
        assert!(html.contains("Change Password"));
        assert!(html.contains("Current Password"));
        assert!(html.contains("Appearance"));
    }
}
