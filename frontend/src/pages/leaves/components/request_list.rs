use leptos::*;

use crate::api::{LeaveDecision, LeaveRequestResponse, LeaveStatus};
use crate::components::empty_state::EmptyState;
use crate::components::error::ErrorBanner;
use crate::components::forms::{DateField, SelectField, TextField};
use crate::pages::leaves::utils::employee_display_name;
use crate::pages::leaves::view_model::LeaveWorkflowViewModel;
use crate::utils::time::format_date;

#[component]
pub fn RequestsView(vm: LeaveWorkflowViewModel) -> impl IntoView {
    let resource = vm.leaves_resource;
    let vm = store_value(vm);
    let loading = resource.loading();
    let error = Signal::derive(move || resource.get().and_then(|result| result.err()));
    let page_data = Signal::derive(move || {
        resource
            .get()
            .and_then(|result| result.ok())
            .unwrap_or_default()
    });

    view! {
        <div class="space-y-6">
            <FilterBar vm=vm.get_value() page_data=page_data/>
            <ErrorBanner error=error/>
            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="py-8 text-center text-fg-muted">"Loading leave requests..."</div> }
            >
                <Show
                    when=move || !page_data.get().leaves.is_empty()
                    fallback=|| {
                        view! {
                            <EmptyState
                                title="No leave requests"
                                message="Nothing matches the current filters"
                            />
                        }
                    }
                >
                    <div class="space-y-4">
                        <For
                            each=move || page_data.get().leaves
                            key=|leave| (leave.id.clone(), leave.status)
                            children=move |leave| {
                                view! { <RequestRow vm=vm.get_value() leave=leave/> }
                            }
                        />
                    </div>
                </Show>
                <Pagination vm=vm.get_value() page_data=page_data/>
            </Show>
        </div>
    }
}

#[component]
fn FilterBar(
    vm: LeaveWorkflowViewModel,
    page_data: Signal<crate::api::PagedLeaves>,
) -> impl IntoView {
    let filters = vm.filters;
    let catalog = vm.catalog_signal();
    let employees = vm.employees_signal();
    let departments = vm.departments_resource;
    let can_manage = vm.can_manage;
    let can_view_all = vm.can_view_all;
    let selection = vm.selection;

    let status_options = vec![
        ("pending".to_string(), "Pending".to_string()),
        ("approved".to_string(), "Approved".to_string()),
        ("rejected".to_string(), "Rejected".to_string()),
    ];
    let type_options = Signal::derive(move || {
        catalog
            .get()
            .types()
            .iter()
            .map(|leave_type| (leave_type.id.clone(), leave_type.name.clone()))
            .collect::<Vec<_>>()
    });
    let employee_options = Signal::derive(move || {
        employees
            .get()
            .iter()
            .map(|employee| (employee.id.clone(), employee.display_name()))
            .collect::<Vec<_>>()
    });
    let department_options = Signal::derive(move || {
        departments
            .get()
            .unwrap_or_default()
            .into_iter()
            .map(|department| (department.id, department.name))
            .collect::<Vec<_>>()
    });

    let vm_select_all = vm.clone();
    let select_all_label = move || {
        let pending_on_page = page_data
            .get()
            .leaves
            .iter()
            .filter(|leave| leave.status == LeaveStatus::Pending)
            .count();
        if pending_on_page > 0 && selection.get().len() == pending_on_page {
            "Deselect All"
        } else {
            "Select All Pending"
        }
    };

    view! {
        <div class="bg-surface-elevated rounded-lg border border-border p-4 space-y-4">
            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4">
                <SelectField
                    label="Status"
                    value=filters.status_signal()
                    options=status_options
                    placeholder="All Status"
                />
                <SelectField
                    label="Type"
                    value=filters.type_signal()
                    options=type_options
                    placeholder="All Types"
                />
                <Show when=move || can_view_all.get()>
                    <SelectField
                        label="Employee"
                        value=filters.employee_signal()
                        options=employee_options
                        placeholder="All Employees"
                    />
                    <SelectField
                        label="Department"
                        value=filters.department_signal()
                        options=department_options
                        placeholder="All Departments"
                    />
                </Show>
                <TextField
                    label="Search"
                    value=vm.search_input
                    placeholder="Search leaves..."
                />
                <DateField label="From" value=filters.range_start_signal()/>
                <DateField label="To" value=filters.range_end_signal()/>
            </div>
            <div class="flex items-center justify-between">
                <div class="flex items-center space-x-4">
                    <span class="text-sm text-fg-muted">
                        {move || {
                            let data = page_data.get();
                            format!("Showing {} of {} requests", data.leaves.len(), data.total)
                        }}
                    </span>
                    <Show when=move || can_manage.get()>
                        {
                            let vm = vm_select_all.clone();
                            view! {
                                <button
                                    type="button"
                                    class="text-sm text-action-primary-bg hover:underline"
                                    on:click=move |_| {
                                        vm.toggle_select_all_pending(&page_data.get_untracked().leaves)
                                    }
                                >
                                    {select_all_label}
                                </button>
                            }
                        }
                    </Show>
                </div>
            </div>
        </div>
    }
}

#[component]
fn RequestRow(vm: LeaveWorkflowViewModel, leave: LeaveRequestResponse) -> impl IntoView {
    let employees = vm.employees_signal();
    let catalog = vm.catalog_signal();
    let can_manage = vm.can_manage;
    let current_user_id = vm.current_user_id;
    let selection = vm.selection;

    let is_pending = leave.status == LeaveStatus::Pending;
    let leave_id = leave.id.clone();
    let leave_id_for_toggle = leave.id.clone();
    let is_selected = Signal::derive(move || selection.get().contains(&leave_id));

    let employee_name = {
        let employee_id = leave.employee_id.clone();
        Signal::derive(move || employee_display_name(&employees.get(), &employee_id))
    };
    let type_key = leave.type_key().to_string();
    let type_name = {
        let type_key = type_key.clone();
        Signal::derive(move || catalog.get().name_of(&type_key))
    };
    let type_color = Signal::derive(move || catalog.get().color_of(&type_key));

    let own_request = {
        let employee_id = leave.employee_id.clone();
        Signal::derive(move || current_user_id.get().as_deref() == Some(employee_id.as_str()))
    };

    let vm_toggle = vm.clone();
    let vm_details = vm.clone();
    let vm_approve = vm.clone();
    let vm_reject = vm.clone();
    let vm_cancel = vm.clone();
    let leave_for_details = leave.clone();
    let leave_for_approve = leave.clone();
    let leave_for_reject = leave.clone();
    let leave_for_cancel_id = leave.id.clone();

    let status_badge = match leave.status {
        LeaveStatus::Approved => ("Approved", "bg-status-success/10 text-status-success"),
        LeaveStatus::Rejected => ("Rejected", "bg-status-danger/10 text-status-danger"),
        LeaveStatus::Pending => ("Pending", "bg-status-warning/10 text-status-warning"),
    };

    view! {
        <div class="border border-border rounded-lg p-4 bg-surface-elevated">
            <div class="flex items-start justify-between">
                <div class="flex items-start space-x-4">
                    <Show when=move || can_manage.get() && is_pending>
                        <input
                            type="checkbox"
                            class="mt-1 h-4 w-4 rounded border-border"
                            prop:checked=move || is_selected.get()
                            on:change={
                                let vm = vm_toggle.clone();
                                let id = leave_id_for_toggle.clone();
                                move |_| vm.toggle_selection(&id)
                            }
                        />
                    </Show>
                    <div class="h-10 w-10 bg-action-primary-bg rounded-full flex items-center justify-center">
                        <span class="text-action-primary-text font-medium text-sm">
                            {move || employee_name.get().chars().next().unwrap_or('?').to_string()}
                        </span>
                    </div>
                    <div class="flex-1">
                        <h4 class="font-semibold text-fg mb-1">{move || employee_name.get()}</h4>
                        <div class="flex flex-wrap items-center gap-x-4 gap-y-1 text-sm text-fg-muted mb-2">
                            <span class="flex items-center space-x-1">
                                <span
                                    class="h-3 w-3 rounded inline-block"
                                    style=move || format!("background-color: {}", type_color.get())
                                ></span>
                                <span>{move || type_name.get()}</span>
                            </span>
                            <span>
                                {format!(
                                    "{} - {}",
                                    format_date(leave.start_date),
                                    format_date(leave.end_date)
                                )}
                            </span>
                            <span>
                                {format!(
                                    "{} day{}",
                                    leave.duration_days(),
                                    if leave.duration_days() == 1 { "" } else { "s" }
                                )}
                            </span>
                        </div>
                        <p class="text-sm text-fg mb-1">{leave.reason.clone()}</p>
                        <p class="text-xs text-fg-muted">
                            {format!("Applied on {}", format_date(leave.applied_date))}
                        </p>
                    </div>
                </div>
                <div class="flex items-center space-x-3">
                    <span class=format!(
                        "px-2 py-1 rounded-full text-xs font-medium capitalize {}",
                        status_badge.1
                    )>{status_badge.0}</span>
                    <div class="flex items-center space-x-1">
                        <button
                            type="button"
                            title="View Details"
                            class="p-2 text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover rounded-lg"
                            on:click=move |_| vm_details.open_details_modal(leave_for_details.clone())
                        >
                            "Details"
                        </button>
                        <Show when=move || can_manage.get() && is_pending>
                            {
                                let vm_a = vm_approve.clone();
                                let vm_r = vm_reject.clone();
                                let leave_a = leave_for_approve.clone();
                                let leave_r = leave_for_reject.clone();
                                view! {
                                    <button
                                        type="button"
                                        title="Approve"
                                        class="p-2 text-status-success hover:bg-status-success/10 rounded-lg"
                                        on:click=move |_| vm_a.on_approve(&leave_a)
                                    >
                                        "Approve"
                                    </button>
                                    <button
                                        type="button"
                                        title="Reject"
                                        class="p-2 text-status-danger hover:bg-status-danger/10 rounded-lg"
                                        on:click=move |_| {
                                            vm_r.open_decision_modal(
                                                leave_r.clone(),
                                                LeaveDecision::Reject,
                                            )
                                        }
                                    >
                                        "Reject"
                                    </button>
                                }
                            }
                        </Show>
                        <Show when=move || is_pending && own_request.get() && !can_manage.get()>
                            {
                                let vm = vm_cancel.clone();
                                let id = leave_for_cancel_id.clone();
                                view! {
                                    <button
                                        type="button"
                                        title="Cancel request"
                                        class="p-2 text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover rounded-lg"
                                        on:click=move |_| vm.on_cancel_request(&id)
                                    >
                                        "Cancel"
                                    </button>
                                }
                            }
                        </Show>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[component]
fn Pagination(
    vm: LeaveWorkflowViewModel,
    page_data: Signal<crate::api::PagedLeaves>,
) -> impl IntoView {
    let filters = vm.filters;
    let total_pages = Signal::derive(move || {
        let total = page_data.get().total.max(0) as u32;
        total.div_ceil(crate::pages::leaves::utils::PAGE_SIZE).max(1)
    });
    let current_page = Signal::derive(move || filters.snapshot().page);

    view! {
        <Show when=move || total_pages.get() > 1>
            <div class="flex items-center justify-between mt-6">
                <span class="text-sm text-fg-muted">
                    {move || format!("Page {} of {}", current_page.get(), total_pages.get())}
                </span>
                <div class="flex items-center space-x-2">
                    <button
                        type="button"
                        class="px-3 py-1 text-sm rounded bg-surface-muted text-fg disabled:opacity-50"
                        disabled=move || current_page.get() <= 1
                        on:click=move |_| filters.set_page(current_page.get_untracked().saturating_sub(1))
                    >
                        "Previous"
                    </button>
                    <button
                        type="button"
                        class="px-3 py-1 text-sm rounded bg-surface-muted text-fg disabled:opacity-50"
                        disabled=move || current_page.get() >= total_pages.get()
                        on:click=move |_| {
                            let next = (current_page.get_untracked() + 1).min(total_pages.get_untracked());
                            filters.set_page(next)
                        }
                    >
                        "Next"
                    </button>
                </div>
            </div>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::Role;
    use crate::pages::leaves::view_model::use_leave_workflow_view_model;
    use crate::test_support::helpers::{provide_auth, user_with_role};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn requests_view_renders_filters() {
        let html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Hr)));
            let vm = use_leave_workflow_view_model();
            view! { <RequestsView vm=vm/> }
        });
        assert!(html.contains("Status"));
        assert!(html.contains("All Types"));
        assert!(html.contains("Search"));
    }

    #[test]
    fn employee_filter_is_hidden_without_view_all() {
        let html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Manager)));
            let vm = use_leave_workflow_view_model();
            view! { <RequestsView vm=vm/> }
        });
        assert!(!html.contains("All Employees"));
    }

    #[test]
    fn request_row_shows_status_and_duration() {
        let html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Hr)));
            let vm = use_leave_workflow_view_model();
            let leave: LeaveRequestResponse = serde_json::from_value(serde_json::json!({
                "id": "1",
                "employee_id": "3",
                "type": "vacation",
                "start_date": "2024-10-15",
                "end_date": "2024-10-19",
                "total_days": 5,
                "reason": "Family vacation",
                "status": "pending",
                "applied_date": "2024-09-25"
            }))
            .unwrap();
            view! { <RequestRow vm=vm leave=leave/> }
        });
        assert!(html.contains("Pending"));
        assert!(html.contains("5 days"));
        assert!(html.contains("Family vacation"));
        assert!(html.contains("Applied on Sep 25, 2024"));
    }
}
