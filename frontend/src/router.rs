use leptos::*;
use leptos_meta::provide_meta_context;
use leptos_router::*;

use crate::{
    components::guard::{RequireAuth, RequireCapability},
    pages::{
        attendance::AttendancePage, employees::EmployeesPage, home::HomePage, leaves::LeavesPage,
        login::LoginPage, positions::PositionsPage, reports::ReportsPage, settings::SettingsPage,
    },
    state::auth::{AuthProvider, Capability},
};

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/login",
    "/employees",
    "/positions",
    "/attendance",
    "/leaves",
    "/reports",
    "/settings",
];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &[
    "/employees",
    "/positions",
    "/attendance",
    "/leaves",
    "/reports",
    "/settings",
];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/", "/login"];

pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_meta_context();
    provide_context(crate::api::ApiClient::new());
    view! {
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/employees" view=ProtectedEmployees/>
                    <Route path="/positions" view=ProtectedPositions/>
                    <Route path="/attendance" view=ProtectedAttendance/>
                    <Route path="/leaves" view=ProtectedLeaves/>
                    <Route path="/reports" view=ProtectedReports/>
                    <Route path="/settings" view=ProtectedSettings/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn ProtectedEmployees() -> impl IntoView {
    view! {
        <RequireCapability capability=Capability::ManageEmployees>
            <EmployeesPage/>
        </RequireCapability>
    }
}

#[component]
fn ProtectedPositions() -> impl IntoView {
    view! {
        <RequireCapability capability=Capability::ManagePositions>
            <PositionsPage/>
        </RequireCapability>
    }
}

#[component]
fn ProtectedAttendance() -> impl IntoView {
    view! { <RequireAuth><AttendancePage/></RequireAuth> }
}

#[component]
fn ProtectedLeaves() -> impl IntoView {
    view! { <RequireAuth><LeavesPage/></RequireAuth> }
}

#[component]
fn ProtectedReports() -> impl IntoView {
    view! {
        <RequireCapability capability=Capability::ViewReports>
            <ReportsPage/>
        </RequireCapability>
    }
}

#[component]
fn ProtectedSettings() -> impl IntoView {
    view! { <RequireAuth><SettingsPage/></RequireAuth> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn route_paths_include_every_page() {
        assert!(ROUTE_PATHS.contains(&"/leaves"));
        assert!(ROUTE_PATHS.contains(&"/attendance"));
        assert!(ROUTE_PATHS.contains(&"/employees"));
    }

    #[test]
    fn protected_routes_are_subset_of_all() {
        let all: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        for path in PROTECTED_ROUTE_PATHS {
            assert!(
                all.contains(path),
                "protected path missing from ROUTE_PATHS: {}",
                path
            );
        }
    }

    #[test]
    fn public_and_protected_routes_do_not_overlap() {
        let public: HashSet<&str> = PUBLIC_ROUTE_PATHS.iter().copied().collect();
        for path in PROTECTED_ROUTE_PATHS {
            assert!(!public.contains(path));
        }
    }

    #[test]
    fn no_duplicate_routes() {
        let unique: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        assert_eq!(unique.len(), ROUTE_PATHS.len());
    }
}
