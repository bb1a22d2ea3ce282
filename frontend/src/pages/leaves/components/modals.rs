use leptos::*;

use crate::api::{LeaveDecision, LeaveRequestResponse, LeaveStatus};
use crate::components::error::ErrorBanner;
use crate::components::forms::{DateField, SelectField, TextAreaField, TextField};
use crate::pages::leaves::utils::employee_display_name;
use crate::pages::leaves::view_model::{LeaveModal, LeaveWorkflowViewModel};
use crate::utils::time::format_date;

/// Mounts whichever modal the view-model says is active; the enum makes
/// "at most one open" structural.
#[component]
pub fn LeaveModals(vm: LeaveWorkflowViewModel) -> impl IntoView {
    let modal = vm.modal;
    move || match modal.get() {
        LeaveModal::None => ().into_view(),
        LeaveModal::RequestForm => view! { <RequestFormModal vm=vm.clone()/> }.into_view(),
        LeaveModal::Decision { leave, decision } => {
            view! { <DecisionModal vm=vm.clone() leave=leave decision=decision/> }.into_view()
        }
        LeaveModal::BulkDecision { decision } => {
            view! { <BulkDecisionModal vm=vm.clone() decision=decision/> }.into_view()
        }
        LeaveModal::Details { leave } => {
            view! { <DetailsModal vm=vm.clone() leave=leave/> }.into_view()
        }
    }
}

#[component]
fn ModalShell(#[prop(into)] title: String, children: Children) -> impl IntoView {
    view! {
        <div class="fixed inset-0 z-50 flex items-center justify-center p-4">
            <div class="absolute inset-0 bg-overlay-backdrop"></div>
            <div
                class="relative z-[51] w-full max-w-2xl max-h-[90vh] overflow-y-auto rounded-lg bg-surface-elevated shadow-xl border border-border"
                role="dialog"
                aria-modal="true"
            >
                <div class="border-b border-border px-6 py-4">
                    <h2 class="text-xl font-semibold text-fg">{title}</h2>
                </div>
                <div class="p-6">{children()}</div>
            </div>
        </div>
    }
}

#[component]
fn RequestFormModal(vm: LeaveWorkflowViewModel) -> impl IntoView {
    let form = vm.form;
    let catalog = vm.catalog_signal();
    let employees = vm.employees_signal();
    let can_manage = vm.can_manage;
    let pending = vm.create_action.pending();
    let error = vm.action_error.read_only();

    let type_options = Signal::derive(move || {
        catalog
            .get()
            .types()
            .iter()
            .map(|leave_type| {
                (
                    leave_type.id.clone(),
                    format!("{} ({} days max)", leave_type.name, leave_type.max_days),
                )
            })
            .collect::<Vec<_>>()
    });
    let employee_options = Signal::derive(move || {
        employees
            .get()
            .iter()
            .map(|employee| {
                let mut label = employee.display_name();
                if let Some(department) = employee.department_name() {
                    label.push_str(&format!(" - {department}"));
                }
                (employee.id.clone(), label)
            })
            .collect::<Vec<_>>()
    });

    let title = if can_manage.get_untracked() {
        "Create Leave Request"
    } else {
        "Request Leave"
    };

    let vm_submit = vm.clone();
    let vm_cancel = vm;

    view! {
        <ModalShell title=title>
            <form
                class="space-y-4"
                on:submit=move |ev| {
                    ev.prevent_default();
                    vm_submit.submit_request();
                }
            >
                <ErrorBanner error=Signal::derive(move || error.get())/>
                <Show when=move || can_manage.get()>
                    <SelectField
                        label="Employee"
                        value=form.employee_id
                        options=employee_options
                        placeholder="Myself"
                    />
                </Show>
                <SelectField
                    label="Leave Type"
                    value=form.leave_type_id
                    options=type_options
                    placeholder="Select leave type"
                />
                <div class="grid grid-cols-2 gap-4">
                    <DateField label="Start Date" value=form.start_date required=true/>
                    <DateField label="End Date" value=form.end_date required=true/>
                </div>
                <TextAreaField
                    label="Reason"
                    value=form.reason
                    placeholder="Please provide a reason for the leave request..."
                    required=true
                />
                <TextField
                    label="Emergency Contact"
                    value=form.emergency_contact
                    placeholder="Contact person and phone number"
                />
                <TextAreaField
                    label="Handover Notes"
                    value=form.handover_notes
                    rows=2
                    placeholder="Anything your team should know while you are away..."
                />
                <div class="flex items-center justify-end space-x-3 pt-4">
                    <button
                        type="button"
                        class="rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg hover:bg-surface-elevated"
                        on:click=move |_| vm_cancel.close_modal()
                    >
                        "Cancel"
                    </button>
                    <button
                        type="submit"
                        class="rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
                        disabled=move || pending.get()
                    >
                        {move || if pending.get() { "Submitting..." } else { "Submit Request" }}
                    </button>
                </div>
            </form>
        </ModalShell>
    }
}

#[component]
fn DecisionModal(
    vm: LeaveWorkflowViewModel,
    leave: LeaveRequestResponse,
    decision: LeaveDecision,
) -> impl IntoView {
    let employees = vm.employees_signal();
    let comment = vm.decision_comment;
    let pending = vm.decide_action.pending();
    let error = vm.action_error.read_only();

    let is_reject = decision == LeaveDecision::Reject;
    let title = if is_reject {
        "Reject Leave Request"
    } else {
        "Approve Leave Request"
    };
    let verb = if is_reject { "reject" } else { "approve" };
    let comment_label = if is_reject {
        "Comments (Required)"
    } else {
        "Comments (Optional)"
    };

    let employee_name = {
        let employee_id = leave.employee_id.clone();
        Signal::derive(move || employee_display_name(&employees.get(), &employee_id))
    };

    let vm_confirm = vm.clone();
    let vm_cancel = vm;

    view! {
        <ModalShell title=title>
            <div class="space-y-4">
                <ErrorBanner error=Signal::derive(move || error.get())/>
                <p class="text-fg">
                    {format!("Are you sure you want to {verb} this leave request?")}
                </p>
                <div class="p-3 bg-surface rounded-lg border border-border text-sm text-fg-muted space-y-1">
                    <p>{move || format!("Employee: {}", employee_name.get())}</p>
                    <p>
                        {format!(
                            "Duration: {} - {} ({} days)",
                            format_date(leave.start_date),
                            format_date(leave.end_date),
                            leave.duration_days()
                        )}
                    </p>
                </div>
                <TextAreaField
                    label=comment_label
                    value=comment
                    placeholder=if is_reject {
                        "Please provide a reason for rejection..."
                    } else {
                        "Any comments..."
                    }
                    required=is_reject
                />
                <div class="flex items-center justify-end space-x-3">
                    <button
                        type="button"
                        class="rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg hover:bg-surface-elevated"
                        on:click=move |_| vm_cancel.close_modal()
                    >
                        "Cancel"
                    </button>
                    <button
                        type="button"
                        class=if is_reject {
                            "rounded-md px-4 py-2 text-sm font-semibold bg-status-danger text-surface hover:opacity-90 disabled:opacity-50"
                        } else {
                            "rounded-md px-4 py-2 text-sm font-semibold bg-status-success text-surface hover:opacity-90 disabled:opacity-50"
                        }
                        disabled=move || pending.get()
                        on:click=move |_| vm_confirm.on_confirm_decision()
                    >
                        {if is_reject { "Reject Request" } else { "Approve Request" }}
                    </button>
                </div>
            </div>
        </ModalShell>
    }
}

#[component]
fn BulkDecisionModal(vm: LeaveWorkflowViewModel, decision: LeaveDecision) -> impl IntoView {
    let comment = vm.decision_comment;
    let selection = vm.selection;
    let pending = vm.bulk_action.pending();
    let error = vm.action_error.read_only();

    let is_reject = decision == LeaveDecision::Reject;
    let title = if is_reject { "Bulk Reject" } else { "Bulk Approve" };

    let vm_confirm = vm.clone();
    let vm_cancel = vm;

    view! {
        <ModalShell title=title>
            <div class="space-y-4">
                <ErrorBanner error=Signal::derive(move || error.get())/>
                <p class="text-fg">
                    {move || {
                        format!(
                            "This will {} {} selected leave request(s).",
                            if is_reject { "reject" } else { "approve" },
                            selection.get().len()
                        )
                    }}
                </p>
                <TextAreaField
                    label=if is_reject { "Shared comments (Required)" } else { "Shared comments" }
                    value=comment
                    placeholder="Comments applied to every selected request..."
                    required=is_reject
                />
                <div class="flex items-center justify-end space-x-3">
                    <button
                        type="button"
                        class="rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg hover:bg-surface-elevated"
                        on:click=move |_| vm_cancel.close_modal()
                    >
                        "Cancel"
                    </button>
                    <button
                        type="button"
                        class="rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50"
                        disabled=move || pending.get()
                        on:click=move |_| vm_confirm.on_confirm_bulk()
                    >
                        {move || if pending.get() { "Working..." } else { "Confirm" }}
                    </button>
                </div>
            </div>
        </ModalShell>
    }
}

#[component]
fn DetailsModal(vm: LeaveWorkflowViewModel, leave: LeaveRequestResponse) -> impl IntoView {
    let employees = vm.employees_signal();
    let catalog = vm.catalog_signal();
    let can_manage = vm.can_manage;

    let employee_name = {
        let employee_id = leave.employee_id.clone();
        Signal::derive(move || employee_display_name(&employees.get(), &employee_id))
    };
    let employee_meta = {
        let employee_id = leave.employee_id.clone();
        Signal::derive(move || {
            employees
                .get()
                .iter()
                .find(|employee| employee.id == employee_id)
                .map(|employee| {
                    (
                        employee.department_name().unwrap_or("-").to_string(),
                        employee.position_title().unwrap_or("-").to_string(),
                    )
                })
                .unwrap_or_else(|| ("-".to_string(), "-".to_string()))
        })
    };
    let type_key = leave.type_key().to_string();
    let type_name = {
        let type_key = type_key.clone();
        Signal::derive(move || catalog.get().name_of(&type_key))
    };
    let type_color = Signal::derive(move || catalog.get().color_of(&type_key));

    let is_pending = leave.status == LeaveStatus::Pending;
    let vm_close = vm.clone();
    let vm_approve = vm.clone();
    let vm_reject = vm;
    let leave_for_approve = leave.clone();
    let leave_for_reject = leave.clone();

    view! {
        <ModalShell title="Leave Request Details">
            <div class="space-y-4">
                <div class="bg-surface rounded-lg border border-border p-4">
                    <h3 class="text-lg font-medium text-fg mb-3">"Employee Information"</h3>
                    <div class="grid grid-cols-2 gap-4 text-sm">
                        <div>
                            <span class="text-fg-muted">"Name:"</span>
                            <p class="text-fg">{move || employee_name.get()}</p>
                        </div>
                        <div>
                            <span class="text-fg-muted">"Department:"</span>
                            <p class="text-fg">{move || employee_meta.get().0}</p>
                        </div>
                        <div>
                            <span class="text-fg-muted">"Position:"</span>
                            <p class="text-fg">{move || employee_meta.get().1}</p>
                        </div>
                        <div>
                            <span class="text-fg-muted">"Employee ID:"</span>
                            <p class="text-fg">{leave.employee_id.clone()}</p>
                        </div>
                    </div>
                </div>

                <div class="bg-surface rounded-lg border border-border p-4">
                    <h3 class="text-lg font-medium text-fg mb-3">"Leave Details"</h3>
                    <div class="grid grid-cols-2 gap-4 text-sm">
                        <div>
                            <span class="text-fg-muted">"Leave Type:"</span>
                            <div class="flex items-center space-x-2 mt-1">
                                <span
                                    class="h-3 w-3 rounded inline-block"
                                    style=move || format!("background-color: {}", type_color.get())
                                ></span>
                                <p class="text-fg">{move || type_name.get()}</p>
                            </div>
                        </div>
                        <div>
                            <span class="text-fg-muted">"Status:"</span>
                            <p class="text-fg capitalize">{leave.status.as_str()}</p>
                        </div>
                        <div>
                            <span class="text-fg-muted">"Start Date:"</span>
                            <p class="text-fg">{format_date(leave.start_date)}</p>
                        </div>
                        <div>
                            <span class="text-fg-muted">"End Date:"</span>
                            <p class="text-fg">{format_date(leave.end_date)}</p>
                        </div>
                        <div>
                            <span class="text-fg-muted">"Total Days:"</span>
                            <p class="text-fg">{leave.duration_days()}</p>
                        </div>
                        <div>
                            <span class="text-fg-muted">"Applied Date:"</span>
                            <p class="text-fg">{format_date(leave.applied_date)}</p>
                        </div>
                    </div>
                </div>

                <div class="bg-surface rounded-lg border border-border p-4">
                    <h3 class="text-lg font-medium text-fg mb-3">"Reason"</h3>
                    <p class="text-fg text-sm">{leave.reason.clone()}</p>
                </div>

                {(leave.emergency_contact.is_some() || leave.handover_notes.is_some()).then(|| {
                    let emergency = leave.emergency_contact.clone();
                    let handover = leave.handover_notes.clone();
                    view! {
                        <div class="bg-surface rounded-lg border border-border p-4 text-sm">
                            <h3 class="text-lg font-medium text-fg mb-3">"Additional Information"</h3>
                            {emergency.map(|value| view! {
                                <div class="mb-3">
                                    <span class="text-fg-muted">"Emergency Contact:"</span>
                                    <p class="text-fg">{value}</p>
                                </div>
                            })}
                            {handover.map(|value| view! {
                                <div>
                                    <span class="text-fg-muted">"Handover Notes:"</span>
                                    <p class="text-fg">{value}</p>
                                </div>
                            })}
                        </div>
                    }
                })}

                {leave.status.is_terminal().then(|| {
                    let approved_by = leave.approved_by.clone().unwrap_or_else(|| "System".into());
                    let decision_date = leave
                        .approved_date
                        .map(format_date)
                        .unwrap_or_else(|| "N/A".into());
                    let rejection_reason = leave.rejection_reason.clone();
                    view! {
                        <div class="bg-surface rounded-lg border border-border p-4 text-sm">
                            <h3 class="text-lg font-medium text-fg mb-3">"Decision"</h3>
                            <div class="grid grid-cols-2 gap-4">
                                <div>
                                    <span class="text-fg-muted">"Decided By:"</span>
                                    <p class="text-fg">{approved_by}</p>
                                </div>
                                <div>
                                    <span class="text-fg-muted">"Decision Date:"</span>
                                    <p class="text-fg">{decision_date}</p>
                                </div>
                            </div>
                            {rejection_reason.map(|reason| view! {
                                <div class="mt-3">
                                    <span class="text-fg-muted">"Comments:"</span>
                                    <p class="text-fg">{reason}</p>
                                </div>
                            })}
                        </div>
                    }
                })}

                <div class="flex items-center justify-end space-x-3 pt-2">
                    <button
                        type="button"
                        class="rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg hover:bg-surface-elevated"
                        on:click=move |_| vm_close.close_modal()
                    >
                        "Close"
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
                                    class="rounded-md px-4 py-2 text-sm font-semibold bg-status-success text-surface hover:opacity-90"
                                    on:click=move |_| vm_a.on_approve(&leave_a)
                                >
                                    "Approve"
                                </button>
                                <button
                                    type="button"
                                    class="rounded-md px-4 py-2 text-sm font-semibold bg-status-danger text-surface hover:opacity-90"
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
                </div>
            </div>
        </ModalShell>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::Role;
    use crate::pages::leaves::view_model::use_leave_workflow_view_model;
    use crate::test_support::helpers::{provide_auth, user_with_role};
    use crate::test_support::ssr::render_to_string;

    fn pending_leave() -> LeaveRequestResponse {
        serde_json::from_value(serde_json::json!({
            "id": "1",
            "employee_id": "3",
            "type": "vacation",
            "start_date": "2024-10-15",
            "end_date": "2024-10-19",
            "reason": "Family vacation",
            "status": "pending",
            "applied_date": "2024-09-25",
            "emergency_contact": "Jane, 555-1234"
        }))
        .unwrap()
    }

    #[test]
    fn nothing_renders_while_no_modal_is_open() {
        let html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Hr)));
            let vm = use_leave_workflow_view_model();
            view! { <LeaveModals vm=vm/> }
        });
        assert!(!html.contains("role=\"dialog\""));
    }

    #[test]
    fn request_form_modal_renders_fields() {
        let html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Hr)));
            let vm = use_leave_workflow_view_model();
            vm.open_request_modal();
            view! { <LeaveModals vm=vm/> }
        });
        assert!(html.contains("Leave Type"));
        assert!(html.contains("Start Date"));
        assert!(html.contains("Reason"));
        assert!(html.contains("Submit Request"));
    }

    #[test]
    fn reject_modal_marks_comments_required() {
        let html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Hr)));
            let vm = use_leave_workflow_view_model();
            vm.open_decision_modal(pending_leave(), LeaveDecision::Reject);
            view! { <LeaveModals vm=vm/> }
        });
        assert!(html.contains("Reject Leave Request"));
        assert!(html.contains("Comments (Required)"));
    }

    #[test]
    fn details_modal_shows_request_fields() {
        let html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Employee)));
            let vm = use_leave_workflow_view_model();
            vm.open_details_modal(pending_leave());
            view! { <LeaveModals vm=vm/> }
        });
        assert!(html.contains("Leave Request Details"));
        assert!(html.contains("Emergency Contact:"));
        assert!(html.contains("Oct 15, 2024"));
    }
}
