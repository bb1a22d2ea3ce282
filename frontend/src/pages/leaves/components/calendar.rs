use chrono::Datelike;
use leptos::*;

use crate::components::error::ErrorBanner;
use crate::pages::leaves::utils::{calendar_grid, employee_display_name, month_title};
use crate::pages::leaves::view_model::LeaveWorkflowViewModel;
use crate::utils::time::today_in_app_tz;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MAX_ENTRIES_PER_CELL: usize = 3;

/// Month grid of approved leave. Pending and rejected requests are never
/// placed on the calendar.
#[component]
pub fn CalendarView(vm: LeaveWorkflowViewModel) -> impl IntoView {
    let month = vm.calendar_month;
    let resource = vm.calendar_resource;
    let employees = vm.employees_signal();
    let catalog = vm.catalog_signal();
    let loading = resource.loading();
    let error = Signal::derive(move || resource.get().and_then(|result| result.err()));
    let records = Signal::derive(move || {
        resource
            .get()
            .and_then(|result| result.ok())
            .unwrap_or_default()
    });

    let vm_prev = vm.clone();
    let vm_next = vm.clone();
    let vm_today = vm.clone();

    let title = move || {
        let (year, month) = month.get();
        month_title(year, month)
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <div class="flex items-center space-x-4">
                    <button
                        type="button"
                        aria-label="Previous month"
                        class="p-2 text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover rounded-lg"
                        on:click=move |_| vm_prev.go_prev_month()
                    >
                        {"‹"}
                    </button>
                    <h2 class="text-xl font-semibold text-fg">{title}</h2>
                    <button
                        type="button"
                        aria-label="Next month"
                        class="p-2 text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover rounded-lg"
                        on:click=move |_| vm_next.go_next_month()
                    >
                        {"›"}
                    </button>
                </div>
                <button
                    type="button"
                    class="rounded-md px-3 py-1.5 text-sm font-medium bg-surface-muted text-fg hover:bg-surface-elevated"
                    on:click=move |_| vm_today.go_current_month()
                >
                    "Today"
                </button>
            </div>

            <ErrorBanner error=error/>

            <div class="bg-surface-elevated rounded-lg border border-border overflow-hidden">
                <div class="grid grid-cols-7 border-b border-border">
                    {WEEKDAYS
                        .iter()
                        .map(|day| {
                            view! {
                                <div class="p-4 text-center text-sm font-medium text-fg-muted">
                                    {*day}
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <div class="p-8 text-center text-fg-muted">"Loading calendar..."</div> }
                >
                    <div class="grid grid-cols-7">
                        <For
                            each=move || {
                                let (year, month_number) = month.get();
                                calendar_grid(year, month_number)
                            }
                            key=|date| *date
                            children=move |date| {
                                let today = today_in_app_tz();
                                let in_month = move || date.month() == month.get().1;
                                let is_today = date == today;
                                let day_records = Signal::derive(move || {
                                    records
                                        .get()
                                        .into_iter()
                                        .filter(|record| record.covers(date))
                                        .collect::<Vec<_>>()
                                });
                                let day_class = move || {
                                    if in_month() {
                                        "min-h-[110px] p-2 border-r border-b border-border bg-surface-elevated"
                                    } else {
                                        "min-h-[110px] p-2 border-r border-b border-border bg-surface"
                                    }
                                };
                                let date_class = move || {
                                    if is_today {
                                        "text-sm font-semibold mb-2 text-action-primary-bg"
                                    } else if in_month() {
                                        "text-sm font-medium mb-2 text-fg"
                                    } else {
                                        "text-sm font-medium mb-2 text-fg-muted"
                                    }
                                };
                                view! {
                                    <div class=day_class>
                                        <div class=date_class>{date.day()}</div>
                                        <div class="space-y-1">
                                            <For
                                                each=move || {
                                                    day_records
                                                        .get()
                                                        .into_iter()
                                                        .take(MAX_ENTRIES_PER_CELL)
                                                        .collect::<Vec<_>>()
                                                }
                                                key=|record| record.id.clone()
                                                children=move |record| {
                                                    let record_for_color = record.clone();
                                                    let record_for_title = record.clone();
                                                    let color = move || {
                                                        catalog.get().color_of(record_for_color.type_key())
                                                    };
                                                    let full_title = move || {
                                                        let name = employee_display_name(
                                                            &employees.get(),
                                                            &record_for_title.employee_id,
                                                        );
                                                        let type_name =
                                                            catalog.get().name_of(record_for_title.type_key());
                                                        format!("{name} - {type_name}")
                                                    };
                                                    let label = move || {
                                                        let name = employee_display_name(
                                                            &employees.get(),
                                                            &record.employee_id,
                                                        );
                                                        let type_name =
                                                            catalog.get().name_of(record.type_key());
                                                        format!(
                                                            "{} - {}",
                                                            name.split_whitespace().next().unwrap_or("Unknown"),
                                                            type_name
                                                        )
                                                    };
                                                    view! {
                                                        <div
                                                            class="text-xs p-1 rounded text-white truncate"
                                                            style=move || format!("background-color: {}", color())
                                                            title=full_title
                                                        >
                                                            {label}
                                                        </div>
                                                    }
                                                }
                                            />
                                            <Show when=move || day_records.get().len() > MAX_ENTRIES_PER_CELL>
                                                <div class="text-xs text-fg-muted p-1">
                                                    {move || format!(
                                                        "+{} more",
                                                        day_records.get().len() - MAX_ENTRIES_PER_CELL
                                                    )}
                                                </div>
                                            </Show>
                                        </div>
                                    </div>
                                }
                            }
                        />
                    </div>
                </Show>
            </div>

            <div class="flex flex-wrap items-center gap-4">
                <span class="text-sm text-fg-muted">"Leave Types:"</span>
                <For
                    each=move || catalog.get().types().to_vec()
                    key=|leave_type| leave_type.id.clone()
                    children=move |leave_type| {
                        let color = leave_type
                            .color
                            .clone()
                            .unwrap_or_else(|| crate::state::leave_catalog::NEUTRAL_COLOR.into());
                        view! {
                            <div class="flex items-center space-x-2">
                                <div
                                    class="h-3 w-3 rounded"
                                    style=format!("background-color: {color}")
                                ></div>
                                <span class="text-sm text-fg">{leave_type.name.clone()}</span>
                            </div>
                        }
                    }
                />
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
    fn calendar_renders_weekday_header_and_legend() {
        let html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Employee)));
            let vm = use_leave_workflow_view_model();
            view! { <CalendarView vm=vm/> }
        });
        assert!(html.contains("Sun"));
        assert!(html.contains("Sat"));
        assert!(html.contains("Leave Types:"));
        assert!(html.contains("Today"));
    }
}
