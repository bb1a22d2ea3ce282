use leptos::*;
use leptos_meta::Title;

use crate::{
    state::auth::{self, can, use_auth, Capability},
    state::theme::{use_theme, Theme},
    utils::nav,
};

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12">
            <div class="animate-spin rounded-full h-10 w-10 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let (auth, _set_auth) = use_auth();
    let theme = use_theme();
    let logout_action = auth::use_logout_action();
    let logout_pending = logout_action.pending();
    create_effect(move |_| {
        if logout_action.value().get().is_some() {
            nav::redirect_to("/login");
        }
    });
    let on_logout = move |_| {
        if logout_pending.get_untracked() {
            return;
        }
        logout_action.dispatch(());
    };
    let user_name = move || {
        auth.get()
            .user
            .map(|user| user.name)
            .unwrap_or_else(|| "Unknown".to_string())
    };
    let user_role = move || {
        auth.get()
            .user
            .map(|user| user.role.to_string())
            .unwrap_or_default()
    };
    let theme_label = move || match theme.theme.get() {
        Theme::Light => "Dark mode",
        Theme::Dark => "Light mode",
    };

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <div class="flex items-center space-x-2">
                        <div class="h-8 w-8 bg-action-primary-bg rounded-lg flex items-center justify-center">
                            <span class="text-action-primary-text font-bold text-sm">"HR"</span>
                        </div>
                        <h1 class="text-xl font-semibold text-fg">"Staffboard"</h1>
                    </div>
                    <div class="flex items-center space-x-4">
                        <button
                            type="button"
                            class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                            on:click=move |_| theme.toggle()
                        >
                            {theme_label}
                        </button>
                        <div class="text-right">
                            <p class="text-sm font-medium text-fg">{user_name}</p>
                            <p class="text-xs text-fg-muted capitalize">{user_role}</p>
                        </div>
                        <button
                            type="button"
                            class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium disabled:opacity-50 hover:bg-action-ghost-bg-hover"
                            on:click=on_logout
                            disabled=move || logout_pending.get()
                        >
                            "Sign out"
                        </button>
                    </div>
                </div>
            </div>
        </header>
    }
}

struct NavItem {
    label: &'static str,
    path: &'static str,
    capability: Option<Capability>,
}

const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        label: "Employees",
        path: "/employees",
        capability: Some(Capability::ManageEmployees),
    },
    NavItem {
        label: "Positions",
        path: "/positions",
        capability: Some(Capability::ManagePositions),
    },
    NavItem {
        label: "Attendance",
        path: "/attendance",
        capability: None,
    },
    NavItem {
        label: "Leave Management",
        path: "/leaves",
        capability: None,
    },
    NavItem {
        label: "Reports",
        path: "/reports",
        capability: Some(Capability::ViewReports),
    },
    NavItem {
        label: "Settings",
        path: "/settings",
        capability: None,
    },
];

#[component]
pub fn Sidebar() -> impl IntoView {
    let (auth, _) = use_auth();
    let active_path = nav::current_path().unwrap_or_default();

    let items = move || {
        let state = auth.get();
        NAV_ITEMS
            .iter()
            .filter(|item| {
                item.capability
                    .map(|capability| can(state.user.as_ref(), capability))
                    .unwrap_or(true)
            })
            .map(|item| (item.label, item.path))
            .collect::<Vec<_>>()
    };

    view! {
        <nav class="w-64 shrink-0 bg-surface border-r border-border min-h-screen p-4 space-y-1 hidden lg:block">
            <For
                each=items
                key=|(_, path)| *path
                children={
                    let active_path = active_path.clone();
                    move |(label, path)| {
                        let is_active = active_path == path;
                        let class = if is_active {
                            "flex items-center px-3 py-3 rounded-lg text-sm font-medium bg-action-primary-bg/10 text-action-primary-bg"
                        } else {
                            "flex items-center px-3 py-3 rounded-lg text-sm font-medium text-fg-muted hover:bg-action-ghost-bg-hover hover:text-fg"
                        };
                        view! { <a href=path class=class>{label}</a> }
                    }
                }
            />
        </nav>
    }
}

/// Page chrome shared by every protected page: header on top, sidebar on
/// the left, content in the remaining space.
#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <Title text="Staffboard HR"/>
        <div class="min-h-screen bg-surface">
            <Header/>
            <div class="flex">
                <Sidebar/>
                <main class="flex-1 p-4 sm:p-6 lg:p-8">{children()}</main>
            </div>
        </div>
    }
}
