use leptos::*;

use super::view_model::{use_positions_view_model, PositionsViewModel};
use crate::components::cards::{Card, CardHeader};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::empty_state::EmptyState;
use crate::components::error::{ErrorBanner, Notice};
use crate::components::forms::{SelectField, TextAreaField, TextField};
use crate::components::layout::Layout;

#[component]
pub fn PositionsPage() -> impl IntoView {
    view! {
        <Layout>
            <PositionsPanel/>
        </Layout>
    }
}

#[component]
pub fn PositionsPanel() -> impl IntoView {
    let vm = use_positions_view_model();
    let resource = vm.positions_resource;
    let loading = resource.loading();
    let list_error = Signal::derive(move || resource.get().and_then(|result| result.err()));
    let positions = Signal::derive(move || {
        resource
            .get()
            .and_then(|result| result.ok())
            .unwrap_or_default()
    });
    let departments = vm.departments_resource;
    let department_cards =
        Signal::derive(move || departments.get().unwrap_or_default());

    let action_error = vm.action_error;
    let action_notice = vm.action_notice;
    let delete_pending = vm.delete_action.pending();
    let delete_open = {
        let delete_target = vm.delete_target;
        Signal::derive(move || delete_target.get().is_some())
    };
    let delete_message = {
        let delete_target = vm.delete_target;
        Signal::derive(move || {
            delete_target
                .get()
                .map(|position| format!("Remove the {} position?", position.title))
                .unwrap_or_default()
        })
    };

    let vm_add = vm.clone();
    let vm_rows = vm.clone();
    let vm_form = vm.clone();
    let vm_confirm = vm.clone();
    let vm_cancel = vm;

    view! {
        <div class="space-y-6">
            <div class="flex flex-col md:flex-row md:items-center md:justify-between">
                <div>
                    <h1 class="text-3xl font-bold text-fg">"Positions"</h1>
                    <p class="text-fg-muted mt-2">"Position catalog and department overview"</p>
                </div>
                <button
                    type="button"
                    class="mt-4 md:mt-0 rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover"
                    on:click=move |_| vm_add.open_form()
                >
                    "Add Position"
                </button>
            </div>

            <Notice message=Signal::derive(move || action_notice.get())/>
            <ErrorBanner error=Signal::derive(move || action_error.get())/>
            <ErrorBanner error=list_error/>

            <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                <For
                    each=move || department_cards.get()
                    key=|department| department.id.clone()
                    children=move |department| {
                        view! {
                            <div class="bg-surface-elevated rounded-lg border border-border px-4 py-3">
                                <p class="text-sm text-fg-muted">{department.name.clone()}</p>
                                <p class="text-2xl font-bold text-fg mt-1">
                                    {department.employee_count.unwrap_or(0)}
                                </p>
                                <p class="text-xs text-fg-muted">"employees"</p>
                            </div>
                        }
                    }
                />
            </div>

            <Card>
                <CardHeader title="All Positions"/>
                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <p class="text-sm text-fg-muted py-4">"Loading positions..."</p> }
                >
                    <Show
                        when=move || !positions.get().is_empty()
                        fallback=|| {
                            view! {
                                <EmptyState
                                    title="No positions yet"
                                    message="Add the first position to get started"
                                />
                            }
                        }
                    >
                        <table class="min-w-full text-sm">
                            <thead>
                                <tr class="text-left text-fg-muted border-b border-border">
                                    <th class="py-2 pr-4 font-medium">"Title"</th>
                                    <th class="py-2 pr-4 font-medium">"Department"</th>
                                    <th class="py-2 pr-4 font-medium">"Salary Range"</th>
                                    <th class="py-2 font-medium text-right">"Actions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || positions.get()
                                    key=|position| position.id.clone()
                                    children={
                                        let vm = vm_rows.clone();
                                        move |position| {
                                            let vm = vm.clone();
                                            let position_for_delete = position.clone();
                                            let salary_range = match (position.min_salary, position.max_salary) {
                                                (Some(min), Some(max)) => {
                                                    format!("${min:.0} - ${max:.0}")
                                                }
                                                (Some(min), None) => format!("from ${min:.0}"),
                                                (None, Some(max)) => format!("up to ${max:.0}"),
                                                (None, None) => "-".to_string(),
                                            };
                                            view! {
                                                <tr class="border-b border-border last:border-b-0">
                                                    <td class="py-2 pr-4 text-fg font-medium">
                                                        {position.title.clone()}
                                                    </td>
                                                    <td class="py-2 pr-4 text-fg">
                                                        {position
                                                            .department
                                                            .as_ref()
                                                            .map(|d| d.name.clone())
                                                            .unwrap_or_else(|| "-".into())}
                                                    </td>
                                                    <td class="py-2 pr-4 text-fg">{salary_range}</td>
                                                    <td class="py-2 text-right">
                                                        <button
                                                            type="button"
                                                            class="text-sm text-status-danger hover:underline"
                                                            on:click=move |_| {
                                                                vm.request_delete(position_for_delete.clone())
                                                            }
                                                        >
                                                            "Delete"
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </Show>
                </Show>
            </Card>

            <PositionFormModal vm=vm_form/>

            <ConfirmDialog
                is_open=delete_open
                title="Delete position"
                message=delete_message
                confirm_label="Delete"
                confirm_disabled=Signal::derive(move || delete_pending.get())
                destructive=true
                on_confirm=Callback::new(move |_| vm_confirm.confirm_delete())
                on_cancel=Callback::new(move |_| vm_cancel.cancel_delete())
            />
        </div>
    }
}

#[component]
fn PositionFormModal(vm: PositionsViewModel) -> impl IntoView {
    let form = vm.form;
    let form_open = vm.form_open;
    let pending = vm.create_action.pending();
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

    let vm_submit = vm.clone();
    let vm_close = vm;

    view! {
        <Show when=move || form_open.get()>
            {
                let vm_submit = vm_submit.clone();
                let vm_close = vm_close.clone();
                view! {
                    <div class="fixed inset-0 z-50 flex items-center justify-center p-4">
                        <div class="absolute inset-0 bg-overlay-backdrop"></div>
                        <div
                            class="relative z-[51] w-full max-w-lg rounded-lg bg-surface-elevated shadow-xl border border-border"
                            role="dialog"
                            aria-modal="true"
                        >
                            <div class="border-b border-border px-6 py-4">
                                <h2 class="text-xl font-semibold text-fg">"Add Position"</h2>
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
                                <TextField label="Title" value=form.title required=true/>
                                <SelectField
                                    label="Department"
                                    value=form.department_id
                                    options=department_options
                                    placeholder="No department"
                                />
                                <div class="grid grid-cols-2 gap-4">
                                    <TextField label="Min Salary" value=form.min_salary/>
                                    <TextField label="Max Salary" value=form.max_salary/>
                                </div>
                                <TextAreaField
                                    label="Description"
                                    value=form.description
                                    rows=2
                                />
                                <div class="flex items-center justify-end space-x-3 pt-2">
                                    <button
                                        type="button"
                                        class="rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg hover:bg-surface-elevated"
                                        on:click={
                                            let vm = vm_close.clone();
                                            move |_| vm.close_form()
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
    }
}
