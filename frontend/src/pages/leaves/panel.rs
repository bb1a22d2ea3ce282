use leptos::*;

use super::components::{
    approvals::ApprovalsView, calendar::CalendarView, modals::LeaveModals,
    request_list::RequestsView, stats::StatsDashboard,
};
use super::view_model::{use_leave_workflow_view_model, LeaveTab};
use crate::api::LeaveDecision;
use crate::components::error::{ErrorBanner, Notice};
use crate::components::layout::Layout;

#[component]
pub fn LeavesPage() -> impl IntoView {
    view! {
        <Layout>
            <LeavesPanel/>
        </Layout>
    }
}

#[component]
pub fn LeavesPanel() -> impl IntoView {
    let vm = use_leave_workflow_view_model();
    let active_tab = vm.active_tab;
    let can_manage = vm.can_manage;
    let can_view_all = vm.can_view_all;
    let selection = vm.selection;
    let action_error = vm.action_error.read_only();
    let action_notice = vm.action_notice.read_only();

    let subtitle = move || {
        if can_view_all.get() {
            "Comprehensive leave management and analytics"
        } else {
            "Manage your leave requests and view balance"
        }
    };

    let vm_request = vm.clone();
    let vm_bulk_approve = vm.clone();
    let vm_bulk_reject = vm.clone();
    let vm_tabs = vm.clone();
    let vm_dashboard = vm.clone();
    let vm_calendar = vm.clone();
    let vm_requests = vm.clone();
    let vm_approvals = vm.clone();
    let vm_modals = vm;

    view! {
        <div class="space-y-6">
            <div class="flex flex-col lg:flex-row lg:items-center lg:justify-between">
                <div>
                    <h1 class="text-3xl font-bold text-fg">"Leave Management"</h1>
                    <p class="text-fg-muted mt-2">{subtitle}</p>
                </div>
                <div class="flex items-center space-x-3 mt-4 lg:mt-0">
                    <button
                        type="button"
                        class="rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover"
                        on:click=move |_| vm_request.open_request_modal()
                    >
                        "Request Leave"
                    </button>
                    <Show when=move || can_manage.get() && !selection.get().is_empty()>
                        {
                            let vm_approve = vm_bulk_approve.clone();
                            let vm_reject = vm_bulk_reject.clone();
                            view! {
                                <div class="flex items-center space-x-2">
                                    <button
                                        type="button"
                                        class="rounded-md px-3 py-2 text-sm font-semibold bg-status-success text-surface hover:opacity-90"
                                        on:click=move |_| {
                                            vm_approve.open_bulk_modal(LeaveDecision::Approve)
                                        }
                                    >
                                        {move || format!("Bulk Approve ({})", selection.get().len())}
                                    </button>
                                    <button
                                        type="button"
                                        class="rounded-md px-3 py-2 text-sm font-semibold bg-status-danger text-surface hover:opacity-90"
                                        on:click=move |_| {
                                            vm_reject.open_bulk_modal(LeaveDecision::Reject)
                                        }
                                    >
                                        {move || format!("Bulk Reject ({})", selection.get().len())}
                                    </button>
                                </div>
                            }
                        }
                    </Show>
                </div>
            </div>

            <div class="border-b border-border">
                <nav class="flex space-x-8">
                    <For
                        each=move || LeaveTab::available_tabs(can_manage.get())
                        key=|tab| *tab
                        children={
                            let vm = vm_tabs.clone();
                            move |tab| {
                                let vm = vm.clone();
                                let class = move || {
                                    if active_tab.get() == tab {
                                        "py-2 px-1 border-b-2 border-action-primary-bg font-medium text-sm text-action-primary-bg"
                                    } else {
                                        "py-2 px-1 border-b-2 border-transparent font-medium text-sm text-fg-muted hover:text-fg"
                                    }
                                };
                                view! {
                                    <button
                                        type="button"
                                        class=class
                                        on:click=move |_| vm.set_tab(tab)
                                    >
                                        {tab.label()}
                                    </button>
                                }
                            }
                        }
                    />
                </nav>
            </div>

            <Notice message=Signal::derive(move || action_notice.get())/>
            <ErrorBanner error=Signal::derive(move || action_error.get())/>

            <Show when=move || active_tab.get() == LeaveTab::Dashboard>
                {
                    let vm = vm_dashboard.clone();
                    view! { <StatsDashboard vm=vm/> }
                }
            </Show>
            <Show when=move || active_tab.get() == LeaveTab::Calendar>
                {
                    let vm = vm_calendar.clone();
                    view! { <CalendarView vm=vm/> }
                }
            </Show>
            <Show when=move || active_tab.get() == LeaveTab::Requests>
                {
                    let vm = vm_requests.clone();
                    view! { <RequestsView vm=vm/> }
                }
            </Show>
            <Show when=move || active_tab.get() == LeaveTab::Approvals && can_manage.get()>
                {
                    let vm = vm_approvals.clone();
                    view! { <ApprovalsView vm=vm/> }
                }
            </Show>

            <LeaveModals vm=vm_modals/>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::Role;
    use crate::test_support::helpers::{provide_auth, user_with_role};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn reviewer_sees_the_approvals_tab() {
        let html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Hr)));
            view! { <LeavesPanel/> }
        });
        assert!(html.contains("Leave Management"));
        assert!(html.contains("Pending Approvals"));
        assert!(html.contains("Comprehensive leave management and analytics"));
    }

    #[test]
    fn employee_does_not_see_the_approvals_tab() {
        let html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Employee)));
            view! { <LeavesPanel/> }
        });
        assert!(!html.contains("Pending Approvals"));
        assert!(html.contains("Manage your leave requests and view balance"));
    }

    #[test]
    fn dashboard_tab_is_the_default_view() {
        let html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Employee)));
            view! { <LeavesPanel/> }
        });
        assert!(html.contains("Total Requests"));
        assert!(html.contains("Quick Actions"));
    }
}
