use leptos::*;

use crate::api::LeaveStatistics;
use crate::components::cards::{Card, CardHeader, StatCard};
use crate::components::forms::SelectField;
use crate::pages::leaves::view_model::{LeaveTab, LeaveWorkflowViewModel};
use crate::state::leave_catalog::LeaveCatalog;

#[component]
pub fn StatsDashboard(vm: LeaveWorkflowViewModel) -> impl IntoView {
    let statistics = {
        let resource = vm.statistics_resource;
        Signal::derive(move || {
            resource
                .get()
                .and_then(|result| result.ok())
                .unwrap_or_default()
        })
    };
    let catalog = vm.catalog_signal();

    view! {
        <div class="space-y-6">
            <StatGrid statistics=statistics/>
            <BalanceSection vm=vm.clone()/>
            <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                <TypeReference catalog=catalog/>
                <QuickActions vm=vm/>
            </div>
        </div>
    }
}

#[component]
fn StatGrid(statistics: Signal<LeaveStatistics>) -> impl IntoView {
    view! {
        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-6">
            <StatCard
                label="Total Requests"
                value=Signal::derive(move || statistics.get().total_requests.to_string())
                subtitle="This year"
            />
            <StatCard
                label="Pending Approval"
                value=Signal::derive(move || statistics.get().pending_count.to_string())
                subtitle="Needs attention"
                accent="text-status-warning"
            />
            <StatCard
                label="Approved"
                value=Signal::derive(move || statistics.get().approved_count.to_string())
                subtitle="This period"
                accent="text-status-success"
            />
            <StatCard
                label="Rejected"
                value=Signal::derive(move || statistics.get().rejected_count.to_string())
                subtitle="This period"
                accent="text-status-danger"
            />
        </div>
    }
}

#[component]
fn BalanceSection(vm: LeaveWorkflowViewModel) -> impl IntoView {
    let balance_resource = vm.balance_resource;
    let catalog = vm.catalog_signal();
    let can_view_all = vm.can_view_all;
    let employees = vm.employees_signal();
    let balance_employee = vm.balance_employee;

    let employee_options = Signal::derive(move || {
        employees
            .get()
            .iter()
            .map(|employee| (employee.id.clone(), employee.display_name()))
            .collect::<Vec<_>>()
    });

    let entries = Signal::derive(move || {
        balance_resource
            .get()
            .and_then(|result| result.ok())
            .map(|balance| balance.leave_types.into_iter().collect::<Vec<_>>())
            .unwrap_or_default()
    });

    view! {
        <Card>
            <CardHeader
                title="Leave Balance"
                subtitle="Allocated, used and remaining days per leave type"
            />
            <Show when=move || can_view_all.get()>
                <div class="max-w-xs mb-4">
                    <SelectField
                        label="Employee"
                        value=balance_employee
                        options=employee_options
                        placeholder="Myself"
                    />
                </div>
            </Show>
            <Show
                when=move || !entries.get().is_empty()
                fallback=|| view! { <p class="text-sm text-fg-muted">"No balance data available."</p> }
            >
                <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                    <For
                        each=move || entries.get()
                        key=|(type_id, _)| type_id.clone()
                        children=move |(type_id, entry)| {
                            view! {
                                <BalanceCard
                                    type_id=type_id
                                    entry=entry
                                    catalog=catalog
                                />
                            }
                        }
                    />
                </div>
            </Show>
        </Card>
    }
}

#[component]
fn BalanceCard(
    type_id: String,
    entry: crate::api::LeaveBalanceEntry,
    catalog: Signal<LeaveCatalog>,
) -> impl IntoView {
    let type_for_color = type_id.clone();
    let type_for_name = type_id.clone();
    let color = move || catalog.get().color_of(&type_for_color);
    let name = move || catalog.get().name_of(&type_for_name);
    let usage_percent = (entry.usage_fraction() * 100.0).round();

    view! {
        <div class="rounded-xl p-6 border border-border bg-surface">
            <div class="flex items-center justify-between mb-4">
                <div class="flex items-center space-x-3">
                    <div
                        class="h-4 w-4 rounded-full"
                        style=move || format!("background-color: {}", color())
                    ></div>
                    <h4 class="font-semibold text-fg">{name}</h4>
                </div>
                <span class="text-2xl font-bold text-fg">
                    {format!("{:.0}", entry.remaining_clamped())}
                </span>
            </div>
            <div class="space-y-2 text-sm">
                <div class="flex justify-between">
                    <span class="text-fg-muted">"Available"</span>
                    <span class="font-medium text-status-success">
                        {format!("{:.0} days", entry.remaining_clamped())}
                    </span>
                </div>
                <div class="flex justify-between">
                    <span class="text-fg-muted">"Used"</span>
                    <span class="font-medium text-status-danger">
                        {format!("{:.0} of {:.0}", entry.used, entry.allocated)}
                    </span>
                </div>
                {(entry.pending > 0.0).then(|| view! {
                    <div class="flex justify-between">
                        <span class="text-fg-muted">"Pending"</span>
                        <span class="font-medium text-status-warning">
                            {format!("{:.0} days", entry.pending)}
                        </span>
                    </div>
                })}
                <div class="mt-4 bg-surface-muted rounded-full h-2 overflow-hidden">
                    <div
                        class="h-full"
                        style=move || {
                            format!("width: {usage_percent}%; background-color: {}", color())
                        }
                    ></div>
                </div>
            </div>
        </div>
    }
}

#[component]
fn TypeReference(catalog: Signal<LeaveCatalog>) -> impl IntoView {
    view! {
        <Card>
            <CardHeader title="Leave Types" subtitle="Available leave categories"/>
            <div class="space-y-4">
                <For
                    each=move || catalog.get().types().to_vec()
                    key=|leave_type| leave_type.id.clone()
                    children=move |leave_type| {
                        let color = leave_type
                            .color
                            .clone()
                            .unwrap_or_else(|| crate::state::leave_catalog::NEUTRAL_COLOR.into());
                        view! {
                            <div class="flex items-center justify-between p-4 bg-surface rounded-lg border border-border">
                                <div class="flex items-center space-x-3">
                                    <div
                                        class="h-4 w-4 rounded-full"
                                        style=format!("background-color: {color}")
                                    ></div>
                                    <div>
                                        <h4 class="font-medium text-fg">{leave_type.name.clone()}</h4>
                                        <p class="text-sm text-fg-muted">
                                            {format!("Max: {} days", leave_type.max_days)}
                                        </p>
                                    </div>
                                </div>
                                <div class="text-right">
                                    <p class="text-sm text-fg">
                                        {format!("{} days", leave_type.advance_notice_days)}
                                    </p>
                                    <p class="text-xs text-fg-muted">"notice required"</p>
                                </div>
                            </div>
                        }
                    }
                />
            </div>
        </Card>
    }
}

#[component]
fn QuickActions(vm: LeaveWorkflowViewModel) -> impl IntoView {
    let statistics = {
        let resource = vm.statistics_resource;
        Signal::derive(move || {
            resource
                .get()
                .and_then(|result| result.ok())
                .unwrap_or_default()
        })
    };
    let can_manage = vm.can_manage;
    let vm_request = vm.clone();
    let vm_calendar = vm.clone();
    let vm_requests = vm.clone();
    let vm_approvals = vm;

    view! {
        <Card>
            <CardHeader title="Quick Actions" subtitle="Common tasks and shortcuts"/>
            <div class="space-y-3">
                <button
                    type="button"
                    class="w-full flex items-center justify-between p-4 rounded-lg border border-border bg-surface hover:bg-action-ghost-bg-hover"
                    on:click=move |_| vm_request.open_request_modal()
                >
                    <span class="text-fg font-medium">"Request Leave"</span>
                    <span class="text-fg-muted">{"→"}</span>
                </button>
                <button
                    type="button"
                    class="w-full flex items-center justify-between p-4 rounded-lg border border-border bg-surface hover:bg-action-ghost-bg-hover"
                    on:click=move |_| vm_calendar.set_tab(LeaveTab::Calendar)
                >
                    <span class="text-fg font-medium">"View Calendar"</span>
                    <span class="text-fg-muted">{"→"}</span>
                </button>
                <button
                    type="button"
                    class="w-full flex items-center justify-between p-4 rounded-lg border border-border bg-surface hover:bg-action-ghost-bg-hover"
                    on:click=move |_| vm_requests.set_tab(LeaveTab::Requests)
                >
                    <span class="text-fg font-medium">"Requests"</span>
                    <Show when=move || statistics.get().pending_count > 0>
                        <span class="px-2 py-1 rounded-full text-xs bg-status-warning text-surface">
                            {move || statistics.get().pending_count}
                        </span>
                    </Show>
                </button>
                <Show when=move || can_manage.get()>
                    {
                        let vm = vm_approvals.clone();
                        view! {
                            <button
                                type="button"
                                class="w-full flex items-center justify-between p-4 rounded-lg border border-border bg-surface hover:bg-action-ghost-bg-hover"
                                on:click=move |_| vm.set_tab(LeaveTab::Approvals)
                            >
                                <span class="text-fg font-medium">"Pending Approvals"</span>
                                <span class="text-fg-muted">{"→"}</span>
                            </button>
                        }
                    }
                </Show>
            </div>
        </Card>
    }
}
