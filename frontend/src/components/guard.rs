use leptos::*;

use crate::{
    components::layout::LoadingSpinner,
    state::auth::{can, use_auth, Capability},
    utils::nav,
};

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth, _) = use_auth();
    let is_authenticated = create_memo(move |_| auth.get().is_authenticated);
    let is_loading = create_memo(move |_| auth.get().loading);
    create_effect(move |_| {
        let state = auth.get();
        if state.loading || state.is_authenticated {
            return;
        }
        nav::redirect_to("/login");
    });
    view! {
        <Show
            when=move || should_render_children(is_authenticated.get(), is_loading.get())
            fallback=move || {
                if is_loading.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn should_render_children(is_authenticated: bool, is_loading: bool) -> bool {
    is_authenticated && !is_loading
}

/// Gate for pages that need more than a session, e.g. the employee
/// directory. Signed-in users without the capability land back on the
/// attendance page.
#[component]
pub fn RequireCapability(capability: Capability, children: ChildrenFn) -> impl IntoView {
    let (auth, _) = use_auth();
    let is_authenticated = create_memo(move |_| auth.get().is_authenticated);
    let is_loading = create_memo(move |_| auth.get().loading);
    let is_allowed = create_memo(move |_| can(auth.get().user.as_ref(), capability));
    create_effect(move |_| {
        let state = auth.get();
        if state.loading {
            return;
        }
        let target = if !state.is_authenticated {
            "/login"
        } else if !can(state.user.as_ref(), capability) {
            "/attendance"
        } else {
            return;
        };
        nav::redirect_to(target);
    });
    view! {
        <Show
            when=move || {
                should_render_gated_children(
                    is_authenticated.get(),
                    is_loading.get(),
                    is_allowed.get(),
                )
            }
            fallback=move || {
                if is_loading.get() {
                    view! { <LoadingSpinner /> }.into_view()
                } else {
                    ().into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn should_render_gated_children(is_authenticated: bool, is_loading: bool, is_allowed: bool) -> bool {
    is_authenticated && is_allowed && !is_loading
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::{RequireAuth, RequireCapability};
    use crate::state::auth::Capability;
    use crate::test_support::helpers::{admin_user, provide_auth, regular_user};
    use crate::test_support::ssr::render_to_string;
    use leptos::*;

    #[test]
    fn require_auth_renders_children_when_authenticated() {
        let html = render_to_string(move || {
            provide_auth(Some(regular_user()));
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(html.contains("protected-content"));
    }

    #[test]
    fn require_auth_hides_children_when_unauthenticated() {
        let html = render_to_string(move || {
            provide_auth(None);
            view! {
                <RequireAuth>
                    {|| view! { <div>"protected-content"</div> }}
                </RequireAuth>
            }
        });
        assert!(!html.contains("protected-content"));
    }

    #[test]
    fn capability_guard_renders_for_privileged_user() {
        let html = render_to_string(move || {
            provide_auth(Some(admin_user()));
            view! {
                <RequireCapability capability=Capability::ManageEmployees>
                    {|| view! { <div>"directory"</div> }}
                </RequireCapability>
            }
        });
        assert!(html.contains("directory"));
    }

    #[test]
    fn capability_guard_hides_for_regular_employee() {
        let html = render_to_string(move || {
            provide_auth(Some(regular_user()));
            view! {
                <RequireCapability capability=Capability::ManageEmployees>
                    {|| view! { <div>"directory"</div> }}
                </RequireCapability>
            }
        });
        assert!(!html.contains("directory"));
    }
}
