use leptos::*;

use super::view_model::{use_employees_view_model, EmployeeModal, EmployeesViewModel};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::empty_state::EmptyState;
use crate::components::error::{ErrorBanner, Notice};
use crate::components::forms::{DateField, SelectField, TextField};
use crate::components::layout::Layout;

#[component]
pub fn EmployeesPage() -> impl IntoView {
    view! {
        <Layout>
            <EmployeesPanel/>
        </Layout>
    }
}

#[component]
pub fn EmployeesPanel() -> impl IntoView {
    let vm = use_employees_view_model();
    let resource = vm.employees_resource;
    let loading = resource.loading();
    let list_error = Signal::derive(move || resource.get().and_then(|result| result.err()));
    let employees = Signal::derive(move || {
        resource
            .get()
            .and_then(|result| result.ok())
            .unwrap_or_default()
    });

    let departments = vm.departments_resource;
    let department_options = Signal::derive(move || {
        departments
            .get()
            .unwrap_or_default()
            .into_iter()
            .map(|department| (department.id, department.name))
            .collect::<Vec<_>>()
    });
    let status_options = vec![
        ("active".to_string(), "Active".to_string()),
        ("inactive".to_string(), "Inactive".to_string()),
    ];

    let filters = vm.filters;
    let action_error = vm.action_error;
    let action_notice = vm.action_notice;

    let vm = store_value(vm);

    view! {
        <div class="space-y-6">
            <div class="flex flex-col md:flex-row md:items-center md:justify-between">
                <div>
                    <h1 class="text-3xl font-bold text-fg">"Employees"</h1>
                    <p class="text-fg-muted mt-2">"Manage the employee directory"</p>
                </div>
                <button
                    type="button"
                    class="mt-4 md:mt-0 rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover"
                    on:click=move |_| vm.get_value().open_create_modal()
                >
                    "Add Employee"
                </button>
            </div>

            <div class="bg-surface-elevated rounded-lg border border-border p-4">
                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    <TextField
                        label="Search"
                        value=filters.search_signal()
                        placeholder="Name or email..."
                    />
                    <SelectField
                        label="Department"
                        value=filters.department_signal()
                        options=department_options
                        placeholder="All Departments"
                    />
                    <SelectField
                        label="Status"
                        value=filters.status_signal()
                        options=status_options
                        placeholder="All"
                    />
                </div>
            </div>

            <Notice message=Signal::derive(move || action_notice.get())/>
            <ErrorBanner error=Signal::derive(move || action_error.get())/>
            <ErrorBanner error=list_error/>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="text-sm text-fg-muted py-8 text-center">"Loading employees..."</p> }
            >
                <Show
                    when=move || !employees.get().is_empty()
                    fallback=|| {
                        view! {
                            <EmptyState
                                title="No employees found"
                                message="Try a different search or add a new employee"
                            />
                        }
                    }
                >
                    <div class="bg-surface-elevated rounded-lg border border-border overflow-x-auto">
                        <table class="min-w-full text-sm">
                            <thead>
                                <tr class="text-left text-fg-muted border-b border-border">
                                    <th class="px-4 py-3 font-medium">"Name"</th>
                                    <th class="px-4 py-3 font-medium">"Email"</th>
                                    <th class="px-4 py-3 font-medium">"Department"</th>
                                    <th class="px-4 py-3 font-medium">"Position"</th>
                                    <th class="px-4 py-3 font-medium">"Status"</th>
                                    <th class="px-4 py-3 font-medium text-right">"Actions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || employees.get()
                                    key=|employee| employee.id.clone()
                                    children=move |employee| {
                                        view! { <EmployeeRow vm=vm.get_value() employee=employee/> }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                </Show>
            </Show>

            <EmployeeModals vm=vm_modal/>
        </div>
    }
}

#[component]
fn EmployeeRow(
    vm: EmployeesViewModel,
    employee: crate::api::EmployeeResponse,
) -> impl IntoView {
    let vm_edit = vm.clone();
    let vm_delete = vm;
    let employee_for_edit = employee.clone();
    let employee_for_delete = employee.clone();

    let status = employee.status.clone().unwrap_or_else(|| "active".into());
    let status_class = if employee.is_active() {
        "px-2 py-1 rounded-full text-xs font-medium bg-status-success/10 text-status-success capitalize"
    } else {
        "px-2 py-1 rounded-full text-xs font-medium bg-status-danger/10 text-status-danger capitalize"
    };

    view! {
        <tr class="border-b border-border last:border-b-0">
            <td class="px-4 py-3">
                <div class="flex items-center space-x-3">
                    <div class="h-8 w-8 bg-action-primary-bg rounded-full flex items-center justify-center">
                        <span class="text-action-primary-text text-xs font-medium">
                            {employee.initial()}
                        </span>
                    </div>
                    <span class="text-fg font-medium">{employee.display_name()}</span>
                </div>
            </td>
            <td class="px-4 py-3 text-fg-muted">
                {employee.email.clone().unwrap_or_else(|| "-".into())}
            </td>
            <td class="px-4 py-3 text-fg">
                {employee.department_name().unwrap_or("-").to_string()}
            </td>
            <td class="px-4 py-3 text-fg">
                {employee.position_title().unwrap_or("-").to_string()}
            </td>
            <td class="px-4 py-3">
                <span class=status_class>{status}</span>
            </td>
            <td class="px-4 py-3 text-right space-x-2">
                <button
                    type="button"
                    class="text-sm text-action-primary-bg hover:underline"
                    on:click=move |_| vm_edit.open_edit_modal(employee_for_edit.clone())
                >
                    "Edit"
                </button>
                <button
                    type="button"
                    class="text-sm text-status-danger hover:underline"
                    on:click=move |_| vm_delete.open_delete_modal(employee_for_delete.clone())
                >
                    "Delete"
                </button>
            </td>
        </tr>
    }
}

#[component]
fn EmployeeModals(vm: EmployeesViewModel) -> impl IntoView {
    let modal = vm.modal;
    let form = vm.form;
    let pending = vm.save_action.pending();
    let delete_pending = vm.delete_action.pending();
    let error = vm.action_error;

    let departments = vm.departments_resource;
    let department_options = Signal::derive(move || {
        departments
            .get()
            .unwrap_or_default()
            .into_iter()
            .map(|department| (department.id, department.name))
            .collect::<Vec<_>>()
    });
    let positions = vm.positions_resource;
    let position_options = Signal::derive(move || {
        positions
            .get()
            .unwrap_or_default()
            .into_iter()
            .map(|position| (position.id, position.title))
            .collect::<Vec<_>>()
    });
    let status_options = vec![
        ("active".to_string(), "Active".to_string()),
        ("inactive".to_string(), "Inactive".to_string()),
    ];

    let is_form_open = Signal::derive(move || matches!(modal.get(), EmployeeModal::Form { .. }));
    let is_editing = Signal::derive(move || {
        matches!(modal.get(), EmployeeModal::Form { editing: Some(_) })
    });
    let is_delete_open =
        Signal::derive(move || matches!(modal.get(), EmployeeModal::ConfirmDelete { .. }));
    let delete_target = Signal::derive(move || match modal.get() {
        EmployeeModal::ConfirmDelete { employee } => employee.display_name(),
        _ => String::new(),
    });

    let vm_submit = vm.clone();
    let vm_close = vm.clone();
    let vm_confirm_delete = vm.clone();
    let vm_cancel_delete = vm;

    view! {
        <Show when=move || is_form_open.get()>
            {
                let vm_submit = vm_submit.clone();
                let vm_close = vm_close.clone();
                let department_options = department_options;
                let position_options = position_options;
                let status_options = status_options.clone();
                view! {
                    <div class="fixed inset-0 z-50 flex items-center justify-center p-4">
                        <div class="absolute inset-0 bg-overlay-backdrop"></div>
                        <div
                            class="relative z-[51] w-full max-w-2xl max-h-[90vh] overflow-y-auto rounded-lg bg-surface-elevated shadow-xl border border-border"
                            role="dialog"
                            aria-modal="true"
                        >
                            <div class="border-b border-border px-6 py-4">
                                <h2 class="text-xl font-semibold text-fg">
                                    {move || if is_editing.get() { "Edit Employee" } else { "Add Employee" }}
                                </h2>
                            </div>
                            <form
                                class="p-6 space-y-4"
                                on:submit={
                                    let vm = vm_submit.clone();
                                    move |ev| {
                                        ev.prevent_default();
                                        vm.submit_form();
                                    }
                                }
                            >
                                <ErrorBanner error=Signal::derive(move || error.get())/>
                                <div class="grid grid-cols-2 gap-4">
                                    <TextField label="First Name" value=form.first_name required=true/>
                                    <TextField label="Last Name" value=form.last_name required=true/>
                                </div>
                                <TextField
                                    label="Email"
                                    value=form.email
                                    input_type="email"
                                    required=true
                                />
                                <div class="grid grid-cols-2 gap-4">
                                    <SelectField
                                        label="Department"
                                        value=form.department_id
                                        options=department_options
                                        placeholder="No department"
                                    />
                                    <SelectField
                                        label="Position"
                                        value=form.position_id
                                        options=position_options
                                        placeholder="No position"
                                    />
                                </div>
                                <div class="grid grid-cols-3 gap-4">
                                    <TextField label="Salary" value=form.salary placeholder="95000"/>
                                    <DateField label="Hire Date" value=form.hire_date/>
                                    <SelectField
                                        label="Status"
                                        value=form.status
                                        options=status_options.clone()
                                        placeholder="Active"
                                    />
                                </div>
                                <div class="flex items-center justify-end space-x-3 pt-4">
                                    <button
                                        type="button"
                                        class="rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg hover:bg-surface-elevated"
                                        on:click={
                                            let vm = vm_close.clone();
                                            move |_| vm.close_modal()
                                        }
                                    >
                                        "Cancel"
                                    </button>
                                    <button
                                        type="submit"
                                        class="rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
                                        disabled=move || pending.get()
                                    >
                                        {move || if pending.get() { "Saving..." } else { "Save" }}
                                    </button>
                                </div>
                            </form>
                        </div>
                    </div>
                }
            }
        </Show>

        <ConfirmDialog
            is_open=is_delete_open
            title="Delete employee"
            message=Signal::derive(move || {
                format!(
                    "Remove {} from the directory? This cannot be undone.",
                    delete_target.get()
                )
            })
            confirm_label="Delete"
            confirm_disabled=Signal::derive(move || delete_pending.get())
            destructive=true
            on_confirm=Callback::new(move |_| vm_confirm_delete.confirm_delete())
            on_cancel=Callback::new(move |_| vm_cancel_delete.close_modal())
        />
    }
}
