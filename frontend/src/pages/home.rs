use leptos::*;

use crate::{state::auth::use_auth, utils::nav};

/// Landing route: signed-in users go straight to the attendance page,
/// everyone else to the login screen.
#[component]
pub fn HomePage() -> impl IntoView {
    let (auth, _) = use_auth();
    create_effect(move |_| {
        let state = auth.get();
        if state.loading {
            return;
        }
        if state.is_authenticated {
            nav::redirect_to("/attendance");
        } else {
            nav::redirect_to("/login");
        }
    });
    view! {
        <div class="min-h-screen bg-surface flex items-center justify-center">
            <div class="text-center">
                <h1 class="text-4xl font-extrabold text-fg">"Staffboard"</h1>
                <p class="mt-3 text-fg-muted">"Human resources, in one place"</p>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::provide_auth;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn home_renders_brand() {
        let html = render_to_string(move || {
            provide_auth(None);
            view! { <HomePage/> }
        });
        assert!(html.contains("Staffboard"));
    }
}
