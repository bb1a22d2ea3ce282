use leptos::*;

use super::utils::{format_time, is_clocked_in, today_record};
use super::view_model::{use_attendance_view_model, ClockDirection};
use crate::components::cards::{Card, CardHeader};
use crate::components::error::{ErrorBanner, Notice};
use crate::components::forms::DateField;
use crate::components::layout::Layout;
use crate::utils::time::{format_date, today_in_app_tz};

#[component]
pub fn AttendancePage() -> impl IntoView {
    view! {
        <Layout>
            <AttendancePanel/>
        </Layout>
    }
}

#[component]
pub fn AttendancePanel() -> impl IntoView {
    let vm = use_attendance_view_model();
    let history_resource = vm.history_resource;
    let history_loading = history_resource.loading();
    let history_error =
        Signal::derive(move || history_resource.get().and_then(|result| result.err()));
    let history = Signal::derive(move || {
        history_resource
            .get()
            .and_then(|result| result.ok())
            .unwrap_or_default()
    });

    let summary_resource = vm.summary_resource;
    let summary = Signal::derive(move || summary_resource.get().and_then(|result| result.ok()));

    let today = today_in_app_tz();
    let todays = Signal::derive(move || today_record(&history.get(), today).cloned());
    let clocked_in = Signal::derive(move || is_clocked_in(todays.get().as_ref()));
    let clock_pending = vm.clock_action.pending();
    let exporting = vm.export_action.pending();

    let clock_message = vm.clock_message;
    let clock_error = vm.clock_error;
    let range_error = vm.range_error;
    let export_error = vm.export_error;
    let export_success = vm.export_success;
    let form_state = vm.form_state;

    let vm_in = vm.clone();
    let vm_out = vm.clone();
    let on_select_current_month = vm.on_select_current_month();
    let on_load_range = vm.on_load_range();
    let on_export_csv = vm.on_export_csv();

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-3xl font-bold text-fg">"Attendance"</h1>
                <p class="text-fg-muted mt-2">"Check in, check out and review your hours"</p>
            </div>

            <Card>
                <CardHeader
                    title=format!("Today ({})", format_date(today))
                    subtitle="Your attendance for the current day"
                />
                <Notice message=Signal::derive(move || clock_message.get())/>
                <ErrorBanner error=Signal::derive(move || clock_error.get())/>
                <div class="grid grid-cols-2 gap-4 text-sm mb-4">
                    <div>
                        <dt class="font-medium text-fg-muted">"Checked in"</dt>
                        <dd class="mt-1 text-fg">
                            {move || {
                                todays
                                    .get()
                                    .and_then(|record| record.check_in)
                                    .map(format_time)
                                    .unwrap_or_else(|| "-".into())
                            }}
                        </dd>
                    </div>
                    <div>
                        <dt class="font-medium text-fg-muted">"Checked out"</dt>
                        <dd class="mt-1 text-fg">
                            {move || {
                                todays
                                    .get()
                                    .and_then(|record| record.check_out)
                                    .map(format_time)
                                    .unwrap_or_else(|| "-".into())
                            }}
                        </dd>
                    </div>
                </div>
                <div class="flex items-center space-x-3">
                    <button
                        type="button"
                        class="rounded-md px-4 py-2 text-sm font-semibold bg-status-success text-surface hover:opacity-90 disabled:opacity-50"
                        disabled=move || clock_pending.get() || clocked_in.get()
                        on:click=move |_| vm_in.on_clock(ClockDirection::In)
                    >
                        "Check In"
                    </button>
                    <button
                        type="button"
                        class="rounded-md px-4 py-2 text-sm font-semibold bg-status-danger text-surface hover:opacity-90 disabled:opacity-50"
                        disabled=move || clock_pending.get() || !clocked_in.get()
                        on:click=move |_| vm_out.on_clock(ClockDirection::Out)
                    >
                        "Check Out"
                    </button>
                </div>
            </Card>

            <Card>
                <CardHeader title="History" subtitle="Pick a range to review past days"/>
                <div class="grid grid-cols-1 md:grid-cols-4 gap-4 items-end mb-4">
                    <DateField label="From" value=form_state.start_date/>
                    <DateField label="To" value=form_state.end_date/>
                    <button
                        type="button"
                        class="rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover"
                        on:click=on_load_range
                    >
                        "Load"
                    </button>
                    <div class="flex items-center space-x-2">
                        <button
                            type="button"
                            class="rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg hover:bg-surface-elevated"
                            on:click=on_select_current_month
                        >
                            "This Month"
                        </button>
                        <button
                            type="button"
                            class="rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg hover:bg-surface-elevated disabled:opacity-50"
                            disabled=move || exporting.get()
                            on:click=on_export_csv
                        >
                            {move || if exporting.get() { "Exporting..." } else { "Export CSV" }}
                        </button>
                    </div>
                </div>
                <ErrorBanner error=Signal::derive(move || range_error.get())/>
                <ErrorBanner error=Signal::derive(move || export_error.get())/>
                <Notice message=Signal::derive(move || export_success.get())/>
                <ErrorBanner error=history_error/>
                <Show
                    when=move || !history_loading.get()
                    fallback=|| view! { <p class="text-sm text-fg-muted py-4">"Loading history..."</p> }
                >
                    <Show
                        when=move || !history.get().is_empty()
                        fallback=|| view! { <p class="text-sm text-fg-muted py-4">"No attendance records in this range."</p> }
                    >
                        <table class="min-w-full text-sm">
                            <thead>
                                <tr class="text-left text-fg-muted border-b border-border">
                                    <th class="py-2 pr-4 font-medium">"Date"</th>
                                    <th class="py-2 pr-4 font-medium">"In"</th>
                                    <th class="py-2 pr-4 font-medium">"Out"</th>
                                    <th class="py-2 pr-4 font-medium">"Hours"</th>
                                    <th class="py-2 font-medium">"Status"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || history.get()
                                    key=|record| record.id.clone()
                                    children=move |record| {
                                        view! {
                                            <tr class="border-b border-border last:border-b-0">
                                                <td class="py-2 pr-4 text-fg">{format_date(record.date)}</td>
                                                <td class="py-2 pr-4 text-fg">
                                                    {record.check_in.map(format_time).unwrap_or_else(|| "-".into())}
                                                </td>
                                                <td class="py-2 pr-4 text-fg">
                                                    {record.check_out.map(format_time).unwrap_or_else(|| "-".into())}
                                                </td>
                                                <td class="py-2 pr-4 text-fg">
                                                    {record
                                                        .total_hours
                                                        .map(|hours| format!("{hours:.2}"))
                                                        .unwrap_or_else(|| "-".into())}
                                                </td>
                                                <td class="py-2 text-fg capitalize">
                                                    {record.status.clone().unwrap_or_else(|| "-".into())}
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </Show>
                </Show>
            </Card>

            <Card>
                <CardHeader title="Monthly Summary"/>
                <Show
                    when=move || summary.get().is_some()
                    fallback=|| view! { <p class="text-sm text-fg-muted">"No summary available."</p> }
                >
                    {move || summary.get().map(|summary| view! {
                        <div class="grid grid-cols-2 md:grid-cols-4 gap-4 text-sm">
                            <div>
                                <dt class="font-medium text-fg-muted">"Present days"</dt>
                                <dd class="mt-1 text-fg">{summary.present_days}</dd>
                            </div>
                            <div>
                                <dt class="font-medium text-fg-muted">"Late days"</dt>
                                <dd class="mt-1 text-fg">{summary.late_days}</dd>
                            </div>
                            <div>
                                <dt class="font-medium text-fg-muted">"Absent days"</dt>
                                <dd class="mt-1 text-fg">{summary.absent_days}</dd>
                            </div>
                            <div>
                                <dt class="font-medium text-fg-muted">"Total hours"</dt>
                                <dd class="mt-1 text-fg">{format!("{:.1}", summary.total_work_hours)}</dd>
                            </div>
                        </div>
                    })}
                </Show>
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
    fn attendance_panel_renders_clock_controls() {
        let html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Employee)));
            view! { <AttendancePanel/> }
        });
        assert!(html.contains("Check In"));
        assert!(html.contains("Check Out"));
        assert!(html.contains("Monthly Summary"));
        assert!(html.contains("Export CSV"));
    }
}
