use std::rc::Rc;

use chrono::Datelike;
use leptos::*;

use super::utils::{department_breakdown, department_csv, DepartmentRow};
use crate::api::{ApiClient, ApiError, EmployeeResponse, LeaveStatistics};
use crate::utils::time::today_in_app_tz;

#[derive(Clone)]
pub struct ReportsViewModel {
    pub employees_resource: Resource<u32, Result<Vec<EmployeeResponse>, ApiError>>,
    pub leave_stats_resource: Resource<u32, Result<LeaveStatistics, ApiError>>,
    pub reload: RwSignal<u32>,
    pub export_error: RwSignal<Option<ApiError>>,
    pub export_success: RwSignal<Option<String>>,
}

impl ReportsViewModel {
    pub fn employees(&self) -> Signal<Vec<EmployeeResponse>> {
        let resource = self.employees_resource;
        Signal::derive(move || {
            resource
                .get()
                .and_then(|result| result.ok())
                .unwrap_or_default()
        })
    }

    pub fn department_rows(&self) -> Signal<Vec<DepartmentRow>> {
        let employees = self.employees();
        Signal::derive(move || department_breakdown(&employees.get()))
    }

    pub fn refresh(&self) {
        self.reload.update(|token| *token = token.wrapping_add(1));
    }

    pub fn export_departments(&self) {
        self.export_error.set(None);
        self.export_success.set(None);
        let rows = self.department_rows().get_untracked();
        if rows.is_empty() {
            self.export_error
                .set(Some(ApiError::validation("Nothing to export yet.")));
            return;
        }
        let csv = department_csv(&rows);
        match crate::utils::trigger_csv_download("departments.csv", &csv) {
            Ok(()) => self
                .export_success
                .set(Some("Downloaded departments.csv.".to_string())),
            Err(err) => self.export_error.set(Some(ApiError::unknown(err))),
        }
    }
}

pub fn use_reports_view_model() -> ReportsViewModel {
    if let Some(vm) = use_context::<ReportsViewModel>() {
        return vm;
    }

    let api = Rc::new(use_context::<ApiClient>().unwrap_or_default());
    let reload = create_rw_signal(0u32);

    let api_for_employees = api.clone();
    let employees_resource = create_resource(
        move || reload.get(),
        move |_| {
            let api = api_for_employees.clone();
            async move { api.list_employees(None, None, None).await }
        },
    );

    let api_for_stats = api.clone();
    let leave_stats_resource = create_resource(
        move || reload.get(),
        move |_| {
            let api = api_for_stats.clone();
            async move {
                api.leave_statistics(Some(today_in_app_tz().year()), None, None, None)
                    .await
            }
        },
    );

    let vm = ReportsViewModel {
        employees_resource,
        leave_stats_resource,
        reload,
        export_error: create_rw_signal(None),
        export_success: create_rw_signal(None),
    };
    provide_context(vm.clone());
    vm
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::Role;
    use crate::test_support::helpers::{provide_auth, user_with_role};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn export_with_no_data_reports_a_validation_error() {
        let _html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Admin)));
            let vm = use_reports_view_model();
            vm.export_departments();
            assert!(vm.export_error.get().is_some());
            view! { <div>"ok"</div> }
        });
    }
}
