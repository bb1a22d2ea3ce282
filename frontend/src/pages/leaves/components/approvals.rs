use leptos::*;

use crate::api::{LeaveDecision, LeaveRequestResponse, LeaveStatus};
use crate::components::empty_state::EmptyState;
use crate::components::error::ErrorBanner;
use crate::pages::leaves::utils::employee_display_name;
use crate::pages::leaves::view_model::LeaveWorkflowViewModel;
use crate::utils::time::format_date;

/// Reviewer queue: the pending slice of the current page, with single and
/// bulk decisions.
#[component]
pub fn ApprovalsView(vm: LeaveWorkflowViewModel) -> impl IntoView {
    let resource = vm.leaves_resource;
    let loading = resource.loading();
    let error = Signal::derive(move || resource.get().and_then(|result| result.err()));
    let pending = Signal::derive(move || {
        resource
            .get()
            .and_then(|result| result.ok())
            .map(|page| {
                page.leaves
                    .into_iter()
                    .filter(|leave| leave.status == LeaveStatus::Pending)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default()
    });

    let vm_bulk_approve = vm.clone();
    let vm_bulk_reject = vm.clone();

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div>
                    <h2 class="text-2xl font-semibold text-fg">"Pending Approvals"</h2>
                    <p class="text-sm text-fg-muted mt-1">"Review and approve leave requests"</p>
                </div>
                <div class="flex items-center space-x-4">
                    <span class="text-status-warning font-medium">
                        {move || format!("{} pending requests", pending.get().len())}
                    </span>
                    <Show when=move || !pending.get().is_empty()>
                        {
                            let vm_approve = vm_bulk_approve.clone();
                            let vm_reject = vm_bulk_reject.clone();
                            let pending_for_approve = pending;
                            let pending_for_reject = pending;
                            view! {
                                <div class="flex items-center space-x-2">
                                    <button
                                        type="button"
                                        class="rounded-md px-3 py-1.5 text-sm font-semibold bg-status-success text-surface hover:opacity-90"
                                        on:click=move |_| {
                                            vm_approve.select_pending(
                                                &pending_for_approve.get_untracked(),
                                            );
                                            vm_approve.open_bulk_modal(LeaveDecision::Approve);
                                        }
                                    >
                                        "Approve All"
                                    </button>
                                    <button
                                        type="button"
                                        class="rounded-md px-3 py-1.5 text-sm font-semibold bg-status-danger text-surface hover:opacity-90"
                                        on:click=move |_| {
                                            vm_reject.select_pending(
                                                &pending_for_reject.get_untracked(),
                                            );
                                            vm_reject.open_bulk_modal(LeaveDecision::Reject);
                                        }
                                    >
                                        "Reject All"
                                    </button>
                                </div>
                            }
                        }
                    </Show>
                </div>
            </div>

            <ErrorBanner error=error/>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="py-8 text-center text-fg-muted">"Loading approvals..."</div> }
            >
                <Show
                    when=move || !pending.get().is_empty()
                    fallback=|| {
                        view! {
                            <EmptyState
                                title="All Caught Up!"
                                message="No pending leave requests require your attention"
                            />
                        }
                    }
                >
                    <div class="space-y-4">
                        <For
                            each=move || pending.get()
                            key=|leave| leave.id.clone()
                            children={
                                let vm = vm.clone();
                                move |leave| {
                                    let vm = vm.clone();
                                    view! { <ApprovalRow vm=vm leave=leave/> }
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}

#[component]
fn ApprovalRow(vm: LeaveWorkflowViewModel, leave: LeaveRequestResponse) -> impl IntoView {
    let employees = vm.employees_signal();
    let catalog = vm.catalog_signal();

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

    let vm_details = vm.clone();
    let vm_approve = vm.clone();
    let vm_reject = vm;
    let leave_for_details = leave.clone();
    let leave_for_approve = leave.clone();
    let leave_for_reject = leave.clone();

    view! {
        <div class="border border-border rounded-lg p-4 bg-surface-elevated">
            <div class="flex items-start justify-between">
                <div class="flex items-start space-x-4 flex-1">
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
                            <span>{format!("{} days", leave.duration_days())}</span>
                        </div>
                        <p class="text-sm text-fg mb-1">{leave.reason.clone()}</p>
                        <p class="text-xs text-fg-muted">
                            {format!("Applied on {}", format_date(leave.applied_date))}
                        </p>
                    </div>
                </div>
                <div class="flex items-center space-x-2">
                    <button
                        type="button"
                        title="View Details"
                        class="p-2 text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover rounded-lg"
                        on:click=move |_| vm_details.open_details_modal(leave_for_details.clone())
                    >
                        "Details"
                    </button>
                    <button
                        type="button"
                        title="Approve"
                        class="p-2 text-status-success hover:bg-status-success/10 rounded-lg"
                        on:click=move |_| vm_approve.on_approve(&leave_for_approve)
                    >
                        "Approve"
                    </button>
                    <button
                        type="button"
                        title="Reject"
                        class="p-2 text-status-danger hover:bg-status-danger/10 rounded-lg"
                        on:click=move |_| {
                            vm_reject.open_decision_modal(
                                leave_for_reject.clone(),
                                LeaveDecision::Reject,
                            )
                        }
                    >
                        "Reject"
                    </button>
                </div>
            </div>
        </div>
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
    fn approvals_view_renders_queue_header() {
        let html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Manager)));
            let vm = use_leave_workflow_view_model();
            view! { <ApprovalsView vm=vm/> }
        });
        assert!(html.contains("Pending Approvals"));
        assert!(html.contains("Review and approve leave requests"));
    }
}
