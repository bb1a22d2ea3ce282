use leptos::*;

use super::utils::{active_headcount, average_salary, highest_salary};
use super::view_model::use_reports_view_model;
use crate::components::cards::{Card, CardHeader, StatCard};
use crate::components::error::{ErrorBanner, Notice};
use crate::components::layout::Layout;

#[component]
pub fn ReportsPage() -> impl IntoView {
    view! {
        <Layout>
            <ReportsPanel/>
        </Layout>
    }
}

#[component]
pub fn ReportsPanel() -> impl IntoView {
    let vm = use_reports_view_model();
    let employees = vm.employees();
    let department_rows = vm.department_rows();
    let leave_stats = {
        let resource = vm.leave_stats_resource;
        Signal::derive(move || {
            resource
                .get()
                .and_then(|result| result.ok())
                .unwrap_or_default()
        })
    };
    let employees_error = {
        let resource = vm.employees_resource;
        Signal::derive(move || resource.get().and_then(|result| result.err()))
    };
    let export_error = vm.export_error;
    let export_success = vm.export_success;

    let vm_export = vm.clone();

    view! {
        <div class="space-y-6">
            <div class="flex flex-col md:flex-row md:items-center md:justify-between">
                <div>
                    <h1 class="text-3xl font-bold text-fg">"Reports & Analytics"</h1>
                    <p class="text-fg-muted mt-2">"Comprehensive insights into your organization"</p>
                </div>
                <button
                    type="button"
                    class="mt-4 md:mt-0 rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover"
                    on:click=move |_| vm_export.export_departments()
                >
                    "Export CSV"
                </button>
            </div>

            <Notice message=Signal::derive(move || export_success.get())/>
            <ErrorBanner error=Signal::derive(move || export_error.get())/>
            <ErrorBanner error=employees_error/>

            <div class="grid grid-cols-1 md:grid-cols-4 gap-6">
                <StatCard
                    label="Total Employees"
                    value=Signal::derive(move || employees.get().len().to_string())
                />
                <StatCard
                    label="Active Employees"
                    value=Signal::derive(move || active_headcount(&employees.get()).to_string())
                    accent="text-status-success"
                />
                <StatCard
                    label="Average Salary"
                    value=Signal::derive(move || {
                        format!("${:.0}", average_salary(&employees.get()))
                    })
                />
                <StatCard
                    label="Pending Leaves"
                    value=Signal::derive(move || leave_stats.get().pending_count.to_string())
                    accent="text-status-warning"
                />
            </div>

            <Card>
                <CardHeader
                    title="Departments"
                    subtitle="Headcount and average salary per department"
                />
                <Show
                    when=move || !department_rows.get().is_empty()
                    fallback=|| view! { <p class="text-sm text-fg-muted">"No department data yet."</p> }
                >
                    <table class="min-w-full text-sm">
                        <thead>
                            <tr class="text-left text-fg-muted border-b border-border">
                                <th class="py-2 pr-4 font-medium">"Department"</th>
                                <th class="py-2 pr-4 font-medium">"Headcount"</th>
                                <th class="py-2 pr-4 font-medium">"Average Salary"</th>
                                <th class="py-2 font-medium">"Share"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || department_rows.get()
                                key=|row| row.name.clone()
                                children=move |row| {
                                    let total = employees.get_untracked().len().max(1);
                                    let share = (row.headcount as f64 / total as f64 * 100.0).round();
                                    view! {
                                        <tr class="border-b border-border last:border-b-0">
                                            <td class="py-2 pr-4 text-fg font-medium">{row.name.clone()}</td>
                                            <td class="py-2 pr-4 text-fg">{row.headcount}</td>
                                            <td class="py-2 pr-4 text-fg">
                                                {format!("${:.0}", row.average_salary)}
                                            </td>
                                            <td class="py-2 w-1/3">
                                                <div class="bg-surface-muted rounded-full h-2 overflow-hidden">
                                                    <div
                                                        class="h-full bg-action-primary-bg"
                                                        style=format!("width: {share}%")
                                                    ></div>
                                                </div>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </Show>
            </Card>

            <Card>
                <CardHeader title="Salary Overview"/>
                <div class="grid grid-cols-2 gap-4 text-sm">
                    <div>
                        <dt class="font-medium text-fg-muted">"Average"</dt>
                        <dd class="mt-1 text-fg text-xl font-bold">
                            {move || format!("${:.0}", average_salary(&employees.get()))}
                        </dd>
                    </div>
                    <div>
                        <dt class="font-medium text-fg-muted">"Highest"</dt>
                        <dd class="mt-1 text-fg text-xl font-bold">
                            {move || format!("${:.0}", highest_salary(&employees.get()))}
                        </dd>
                    </div>
                </div>
            </Card>
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
    fn reports_panel_renders_metrics_and_table() {
        let html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Admin)));
            view! { <ReportsPanel/> }
        });
        assert!(html.contains("Reports & Analytics"));
        assert!(html.contains("Total Employees"));
        assert!(html.contains("Departments"));
        assert!(html.contains("Export CSV"));
    }
}
