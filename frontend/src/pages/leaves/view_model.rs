use std::collections::BTreeSet;
use std::rc::Rc;

use chrono::Datelike;
use leptos::*;

use super::repository::LeaveRepository;
use super::utils::{
    calendar_grid, validate_decision, LeaveFilterCriteria, LeaveFilterSnapshot, LeaveFilterState,
    LeaveFormState,
};
use crate::api::{
    ApiClient, ApiError, BulkActionResponse, CreateLeavePayload, DepartmentResponse,
    EmployeeResponse, LeaveBalance, LeaveDecision, LeaveRequestResponse, LeaveStatistics,
    LeaveStatus, PagedLeaves,
};
use crate::state::auth::{can, use_auth, Capability};
use crate::state::leave_catalog::LeaveCatalog;
use crate::utils::time::today_in_app_tz;

/// Four screens over one filtered dataset. The approvals tab only exists
/// for reviewers; that guard lives in `available_tabs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeaveTab {
    Dashboard,
    Calendar,
    Requests,
    Approvals,
}

impl LeaveTab {
    pub fn label(&self) -> &'static str {
        match self {
            LeaveTab::Dashboard => "Dashboard",
            LeaveTab::Calendar => "Calendar",
            LeaveTab::Requests => "Requests",
            LeaveTab::Approvals => "Pending Approvals",
        }
    }

    pub fn available_tabs(can_manage: bool) -> Vec<LeaveTab> {
        let mut tabs = vec![LeaveTab::Dashboard, LeaveTab::Calendar, LeaveTab::Requests];
        if can_manage {
            tabs.push(LeaveTab::Approvals);
        }
        tabs
    }
}

/// At most one modal is ever open; replacing the variant closes the rest.
#[derive(Clone, Default)]
pub enum LeaveModal {
    #[default]
    None,
    RequestForm,
    Decision {
        leave: LeaveRequestResponse,
        decision: LeaveDecision,
    },
    BulkDecision {
        decision: LeaveDecision,
    },
    Details {
        leave: LeaveRequestResponse,
    },
}

impl LeaveModal {
    pub fn is_none(&self) -> bool {
        matches!(self, LeaveModal::None)
    }
}

#[derive(Clone)]
pub struct DecisionPayload {
    pub id: String,
    pub current_status: LeaveStatus,
    pub decision: LeaveDecision,
    pub comments: String,
}

#[derive(Clone)]
pub struct BulkPayload {
    pub decision: LeaveDecision,
    pub ids: Vec<String>,
    pub comments: String,
}

#[derive(Clone)]
pub struct LeaveWorkflowViewModel {
    pub repository: LeaveRepository,
    pub active_tab: RwSignal<LeaveTab>,
    pub filters: LeaveFilterState,
    pub search_input: RwSignal<String>,
    pub reload: RwSignal<u32>,
    pub leaves_resource: Resource<(LeaveFilterSnapshot, u32), Result<PagedLeaves, ApiError>>,
    pub statistics_resource: Resource<u32, Result<LeaveStatistics, ApiError>>,
    pub balance_employee: RwSignal<String>,
    pub balance_resource: Resource<(String, Option<String>, u32), Result<LeaveBalance, ApiError>>,
    pub catalog_resource: Resource<(), LeaveCatalog>,
    pub employees_resource: Resource<(), Vec<EmployeeResponse>>,
    pub departments_resource: Resource<(), Vec<DepartmentResponse>>,
    pub calendar_month: RwSignal<(i32, u32)>,
    pub calendar_resource:
        Resource<((i32, u32), u32), Result<Vec<LeaveRequestResponse>, ApiError>>,
    pub selection: RwSignal<BTreeSet<String>>,
    pub modal: RwSignal<LeaveModal>,
    pub form: LeaveFormState,
    pub decision_comment: RwSignal<String>,
    pub create_action: Action<CreateLeavePayload, Result<LeaveRequestResponse, ApiError>>,
    pub decide_action: Action<DecisionPayload, Result<LeaveRequestResponse, ApiError>>,
    pub bulk_action: Action<BulkPayload, Result<BulkActionResponse, ApiError>>,
    pub cancel_action: Action<String, Result<(), ApiError>>,
    pub action_error: RwSignal<Option<ApiError>>,
    pub action_notice: RwSignal<Option<String>>,
    pub can_manage: Memo<bool>,
    pub can_view_all: Memo<bool>,
    pub current_user_id: Memo<Option<String>>,
}

impl LeaveWorkflowViewModel {
    pub fn catalog_signal(&self) -> Signal<LeaveCatalog> {
        let resource = self.catalog_resource;
        Signal::derive(move || resource.get().unwrap_or_else(LeaveCatalog::builtin))
    }

    pub fn employees_signal(&self) -> Signal<Vec<EmployeeResponse>> {
        let resource = self.employees_resource;
        Signal::derive(move || resource.get().unwrap_or_default())
    }

    pub fn set_tab(&self, tab: LeaveTab) {
        // Bulk selection only means anything on the requests tab.
        if tab != LeaveTab::Requests {
            self.selection.update(|selection| selection.clear());
        }
        self.active_tab.set(tab);
    }

    pub fn refresh(&self) {
        self.reload.update(|token| *token = token.wrapping_add(1));
    }

    pub fn open_request_modal(&self) {
        self.action_error.set(None);
        self.modal.set(LeaveModal::RequestForm);
    }

    pub fn open_decision_modal(&self, leave: LeaveRequestResponse, decision: LeaveDecision) {
        self.action_error.set(None);
        self.decision_comment.set(String::new());
        self.modal.set(LeaveModal::Decision { leave, decision });
    }

    pub fn open_bulk_modal(&self, decision: LeaveDecision) {
        if self.selection.with_untracked(|s| s.is_empty()) {
            self.action_error
                .set(Some(ApiError::validation("Please select leave requests first.")));
            return;
        }
        self.action_error.set(None);
        self.decision_comment.set(String::new());
        self.modal.set(LeaveModal::BulkDecision { decision });
    }

    pub fn open_details_modal(&self, leave: LeaveRequestResponse) {
        self.modal.set(LeaveModal::Details { leave });
    }

    pub fn close_modal(&self) {
        self.modal.set(LeaveModal::None);
    }

    pub fn toggle_selection(&self, id: &str) {
        let id = id.to_string();
        self.selection.update(|selection| {
            if !selection.remove(&id) {
                selection.insert(id);
            }
        });
    }

    /// Select-all over the current page's pending rows; a second press
    /// clears the selection.
    pub fn toggle_select_all_pending(&self, leaves: &[LeaveRequestResponse]) {
        let pending: BTreeSet<String> = leaves
            .iter()
            .filter(|leave| leave.status == LeaveStatus::Pending)
            .map(|leave| leave.id.clone())
            .collect();
        self.selection.update(|selection| {
            if *selection == pending {
                selection.clear();
            } else {
                *selection = pending;
            }
        });
    }

    /// Replaces the selection with every pending row, for the queue-wide
    /// approve/reject buttons.
    pub fn select_pending(&self, leaves: &[LeaveRequestResponse]) {
        let pending: BTreeSet<String> = leaves
            .iter()
            .filter(|leave| leave.status == LeaveStatus::Pending)
            .map(|leave| leave.id.clone())
            .collect();
        self.selection.set(pending);
    }

    /// Single-click approve straight from a list row.
    pub fn on_approve(&self, leave: &LeaveRequestResponse) {
        self.action_error.set(None);
        self.decide_action.dispatch(DecisionPayload {
            id: leave.id.clone(),
            current_status: leave.status,
            decision: LeaveDecision::Approve,
            comments: String::new(),
        });
    }

    /// Confirms the open decision modal. Validation runs here, before the
    /// store is involved: rejecting with an empty comment never dispatches.
    pub fn on_confirm_decision(&self) {
        let LeaveModal::Decision { leave, decision } = self.modal.get_untracked() else {
            return;
        };
        let comments = self.decision_comment.get_untracked();
        if let Err(err) = validate_decision(leave.status, decision, &comments) {
            self.action_error.set(Some(err));
            return;
        }
        self.action_error.set(None);
        self.decide_action.dispatch(DecisionPayload {
            id: leave.id,
            current_status: leave.status,
            decision,
            comments,
        });
    }

    pub fn on_confirm_bulk(&self) {
        let LeaveModal::BulkDecision { decision } = self.modal.get_untracked() else {
            return;
        };
        let comments = self.decision_comment.get_untracked();
        if decision == LeaveDecision::Reject && comments.trim().is_empty() {
            self.action_error.set(Some(ApiError::validation(
                "Please provide a reason for the rejection.",
            )));
            return;
        }
        let ids: Vec<String> = self.selection.get_untracked().into_iter().collect();
        self.action_error.set(None);
        self.bulk_action.dispatch(BulkPayload {
            decision,
            ids,
            comments,
        });
    }

    pub fn on_cancel_request(&self, id: &str) {
        self.action_error.set(None);
        self.cancel_action.dispatch(id.to_string());
    }

    pub fn submit_request(&self) {
        let catalog = self.catalog_signal().get_untracked();
        let fallback = self.current_user_id.get_untracked();
        match self.form.to_payload(&catalog, fallback.as_deref()) {
            Ok(payload) => {
                self.action_error.set(None);
                self.create_action.dispatch(payload);
            }
            Err(err) => self.action_error.set(Some(err)),
        }
    }

    pub fn go_prev_month(&self) {
        self.calendar_month
            .update(|(year, month)| (*year, *month) = super::utils::prev_month(*year, *month));
    }

    pub fn go_next_month(&self) {
        self.calendar_month
            .update(|(year, month)| (*year, *month) = super::utils::next_month(*year, *month));
    }

    pub fn go_current_month(&self) {
        let today = today_in_app_tz();
        self.calendar_month.set((today.year(), today.month()));
    }
}

pub fn use_leave_workflow_view_model() -> LeaveWorkflowViewModel {
    if let Some(vm) = use_context::<LeaveWorkflowViewModel>() {
        return vm;
    }

    let (auth, _) = use_auth();
    let api = use_context::<ApiClient>().unwrap_or_default();
    let repository = LeaveRepository::new_with_client(Rc::new(api));

    let can_manage = create_memo(move |_| can(auth.get().user.as_ref(), Capability::ManageLeaves));
    let can_view_all =
        create_memo(move |_| can(auth.get().user.as_ref(), Capability::ViewAllLeaves));
    let current_user_id = create_memo(move |_| auth.get().user.map(|user| user.id));

    let active_tab = create_rw_signal(LeaveTab::Dashboard);
    let filters = LeaveFilterState::new();
    let search_input = create_rw_signal(String::new());
    let reload = create_rw_signal(0u32);
    let selection = create_rw_signal(BTreeSet::new());
    let modal = create_rw_signal(LeaveModal::None);
    let form = LeaveFormState::new();
    let decision_comment = create_rw_signal(String::new());
    let action_error = create_rw_signal(None::<ApiError>);
    let action_notice = create_rw_signal(None::<String>);

    let today = today_in_app_tz();
    let calendar_month = create_rw_signal((today.year(), today.month()));

    // A newer filter/page key supersedes any in-flight load for the old
    // key; late responses for superseded keys are discarded by the
    // resource, so the list never flickers backwards.
    let repo_for_list = repository.clone();
    let filters_for_list = filters;
    let leaves_resource = create_resource(
        move || (filters_for_list.snapshot(), reload.get()),
        move |(snapshot, _)| {
            let repo = repo_for_list.clone();
            async move { repo.fetch_page(&snapshot).await }
        },
    );

    let repo_for_stats = repository.clone();
    let statistics_resource = create_resource(
        move || reload.get(),
        move |_| {
            let repo = repo_for_stats.clone();
            async move { repo.statistics(today_in_app_tz().year()).await }
        },
    );

    let balance_employee = create_rw_signal(String::new());
    let repo_for_balance = repository.clone();
    let balance_resource = create_resource(
        move || (balance_employee.get(), current_user_id.get(), reload.get()),
        move |(selected, user_id, _)| {
            let repo = repo_for_balance.clone();
            async move {
                let employee_id = if selected.is_empty() {
                    user_id
                } else {
                    Some(selected)
                };
                match employee_id {
                    Some(employee_id) => {
                        repo.balance(&employee_id, Some(today_in_app_tz().year()))
                            .await
                    }
                    None => Ok(LeaveBalance::default()),
                }
            }
        },
    );

    let repo_for_catalog = repository.clone();
    let catalog_resource = create_resource(
        || (),
        move |_| {
            let repo = repo_for_catalog.clone();
            async move { repo.catalog().await }
        },
    );

    let api_for_employees = use_context::<ApiClient>().unwrap_or_default();
    let employees_resource = create_resource(
        || (),
        move |_| {
            let api = api_for_employees.clone();
            async move {
                api.list_employees(None, None, None).await.unwrap_or_else(|err| {
                    log::warn!("Failed to load employees: {err}");
                    Vec::new()
                })
            }
        },
    );

    let api_for_departments = use_context::<ApiClient>().unwrap_or_default();
    let departments_resource = create_resource(
        || (),
        move |_| {
            let api = api_for_departments.clone();
            async move {
                api.list_departments().await.unwrap_or_else(|err| {
                    log::warn!("Failed to load departments: {err}");
                    Vec::new()
                })
            }
        },
    );

    let repo_for_calendar = repository.clone();
    let calendar_resource = create_resource(
        move || (calendar_month.get(), reload.get()),
        move |((year, month), _)| {
            let repo = repo_for_calendar.clone();
            async move {
                let grid = calendar_grid(year, month);
                match (grid.first(), grid.last()) {
                    (Some(&start), Some(&end)) => repo.calendar(start, end).await,
                    _ => Ok(Vec::new()),
                }
            }
        },
    );

    let repo_for_create = repository.clone();
    let create_action = create_action(move |payload: &CreateLeavePayload| {
        let repo = repo_for_create.clone();
        let payload = payload.clone();
        async move { repo.create(&payload).await }
    });

    let repo_for_decide = repository.clone();
    let decide_action = leptos::create_action(move |payload: &DecisionPayload| {
        let repo = repo_for_decide.clone();
        let payload = payload.clone();
        async move {
            repo.decide(
                payload.current_status,
                &payload.id,
                payload.decision,
                &payload.comments,
            )
            .await
        }
    });

    let repo_for_bulk = repository.clone();
    let bulk_action = leptos::create_action(move |payload: &BulkPayload| {
        let repo = repo_for_bulk.clone();
        let payload = payload.clone();
        async move {
            repo.bulk_decide(payload.decision, &payload.ids, &payload.comments)
                .await
        }
    });

    let repo_for_cancel = repository.clone();
    let cancel_action = leptos::create_action(move |id: &String| {
        let repo = repo_for_cancel.clone();
        let id = id.clone();
        async move { repo.cancel(&id).await }
    });

    let vm = LeaveWorkflowViewModel {
        repository,
        active_tab,
        filters,
        search_input,
        reload,
        leaves_resource,
        statistics_resource,
        balance_employee,
        balance_resource,
        catalog_resource,
        employees_resource,
        departments_resource,
        calendar_month,
        calendar_resource,
        selection,
        modal,
        form,
        decision_comment,
        create_action,
        decide_action,
        bulk_action,
        cancel_action,
        action_error,
        action_notice,
        can_manage,
        can_view_all,
        current_user_id,
    };

    wire_effects(&vm);
    provide_context(vm.clone());
    vm
}

fn wire_effects(vm: &LeaveWorkflowViewModel) {
    // Any filter change resets pagination and invalidates the bulk
    // selection; the page cursor is deliberately left out of the key.
    let filters = vm.filters;
    let selection = vm.selection;
    let criteria = Signal::derive(move || filters.criteria());
    create_effect(move |prev: Option<LeaveFilterCriteria>| {
        let current = criteria.get();
        if let Some(prev) = prev {
            if prev != current {
                filters.reset_page();
                selection.update(|selection| selection.clear());
            }
        }
        current
    });

    // Debounced free-text search: the raw input settles for 300ms before
    // it becomes a filter (and thus a re-fetch).
    let search_input = vm.search_input;
    let debounce_token = create_rw_signal(0u32);
    create_effect(move |prev: Option<String>| {
        let value = search_input.get();
        if prev.is_none() || prev.as_deref() == Some(value.as_str()) {
            return value;
        }
        let my_token = debounce_token.get_untracked().wrapping_add(1);
        debounce_token.set_untracked(my_token);
        let applied = value.clone();
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(300).await;
            if debounce_token.get_untracked() == my_token {
                filters.set_search(applied);
            }
        });
        value
    });

    let create_action = vm.create_action;
    let decide_action = vm.decide_action;
    let bulk_action = vm.bulk_action;
    let cancel_action = vm.cancel_action;
    let action_error = vm.action_error;
    let action_notice = vm.action_notice;
    let modal = vm.modal;
    let form = vm.form;
    let decision_comment = vm.decision_comment;
    let reload = vm.reload;

    let bump = move || reload.update(|token| *token = token.wrapping_add(1));

    create_effect(move |_| {
        if let Some(result) = create_action.value().get() {
            match result {
                Ok(_) => {
                    action_notice.set(Some("Leave request submitted.".to_string()));
                    form.reset();
                    modal.set(LeaveModal::None);
                    bump();
                }
                Err(err) => action_error.set(Some(err)),
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = decide_action.value().get() {
            match result {
                Ok(updated) => {
                    action_notice.set(Some(format!("Leave request {}.", updated.status)));
                    decision_comment.set(String::new());
                    modal.set(LeaveModal::None);
                    bump();
                }
                Err(err) => action_error.set(Some(err)),
            }
        }
    });

    // Selection is cleared after a bulk action completes, success or
    // failure; the aggregate outcome is reported either way.
    let selection_for_bulk = vm.selection;
    create_effect(move |_| {
        if let Some(result) = bulk_action.value().get() {
            selection_for_bulk.update(|selection| selection.clear());
            decision_comment.set(String::new());
            modal.set(LeaveModal::None);
            match result {
                Ok(outcome) => {
                    action_notice.set(Some(format!(
                        "Bulk action completed: {} succeeded, {} failed.",
                        outcome.succeeded(),
                        outcome.failed()
                    )));
                    bump();
                }
                Err(err) => action_error.set(Some(err)),
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = cancel_action.value().get() {
            match result {
                Ok(()) => {
                    action_notice.set(Some("Leave request cancelled.".to_string()));
                    bump();
                }
                Err(err) => action_error.set(Some(err)),
            }
        }
    });
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::helpers::{provide_auth, user_with_role};
    use crate::test_support::ssr::render_to_string;
    use crate::api::Role;

    fn leave(id: &str, status: LeaveStatus) -> LeaveRequestResponse {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "employee_id": "3",
            "type": "vacation",
            "start_date": "2024-10-15",
            "end_date": "2024-10-19",
            "status": status.as_str(),
            "applied_date": "2024-09-25",
            "reason": "Family vacation"
        }))
        .unwrap()
    }

    #[test]
    fn approvals_tab_is_reviewer_only() {
        assert_eq!(LeaveTab::available_tabs(false).len(), 3);
        let tabs = LeaveTab::available_tabs(true);
        assert_eq!(tabs.len(), 4);
        assert!(tabs.contains(&LeaveTab::Approvals));
    }

    #[test]
    fn view_model_initializes_on_dashboard_with_empty_selection() {
        let _html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Hr)));
            let vm = use_leave_workflow_view_model();
            assert_eq!(vm.active_tab.get(), LeaveTab::Dashboard);
            assert!(vm.selection.get().is_empty());
            assert!(vm.modal.get().is_none());
            assert!(vm.can_manage.get());
            view! { <div>"ok"</div> }
        });
    }

    #[test]
    fn opening_one_modal_replaces_the_previous_one() {
        let _html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Hr)));
            let vm = use_leave_workflow_view_model();
            vm.open_request_modal();
            assert!(matches!(vm.modal.get(), LeaveModal::RequestForm));
            vm.open_details_modal(leave("1", LeaveStatus::Pending));
            assert!(matches!(vm.modal.get(), LeaveModal::Details { .. }));
            vm.close_modal();
            assert!(vm.modal.get().is_none());
            view! { <div>"ok"</div> }
        });
    }

    #[test]
    fn reject_confirmation_with_empty_comment_never_dispatches() {
        let _html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Hr)));
            let vm = use_leave_workflow_view_model();
            vm.open_decision_modal(leave("1", LeaveStatus::Pending), LeaveDecision::Reject);
            vm.on_confirm_decision();
            assert!(vm.action_error.get().is_some());
            assert!(vm.decide_action.value().get().is_none());
            view! { <div>"ok"</div> }
        });
    }

    #[test]
    fn select_all_pending_toggles_only_pending_rows() {
        let _html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Admin)));
            let vm = use_leave_workflow_view_model();
            let page = vec![
                leave("1", LeaveStatus::Pending),
                leave("2", LeaveStatus::Approved),
                leave("3", LeaveStatus::Pending),
            ];
            vm.toggle_select_all_pending(&page);
            let selected = vm.selection.get();
            assert_eq!(selected.len(), 2);
            assert!(selected.contains("1") && selected.contains("3"));
            vm.toggle_select_all_pending(&page);
            assert!(vm.selection.get().is_empty());
            view! { <div>"ok"</div> }
        });
    }

    #[test]
    fn leaving_the_requests_tab_clears_the_selection() {
        let _html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Admin)));
            let vm = use_leave_workflow_view_model();
            vm.set_tab(LeaveTab::Requests);
            vm.toggle_selection("1");
            assert_eq!(vm.selection.get().len(), 1);
            vm.set_tab(LeaveTab::Calendar);
            assert!(vm.selection.get().is_empty());
            view! { <div>"ok"</div> }
        });
    }

    #[test]
    fn bulk_modal_requires_a_selection_first() {
        let _html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Admin)));
            let vm = use_leave_workflow_view_model();
            vm.open_bulk_modal(LeaveDecision::Approve);
            assert!(vm.modal.get().is_none());
            assert!(vm.action_error.get().is_some());

            vm.toggle_selection("1");
            vm.open_bulk_modal(LeaveDecision::Approve);
            assert!(matches!(vm.modal.get(), LeaveModal::BulkDecision { .. }));
            view! { <div>"ok"</div> }
        });
    }

    #[test]
    fn month_navigation_round_trips() {
        let _html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Employee)));
            let vm = use_leave_workflow_view_model();
            let start = vm.calendar_month.get();
            vm.go_next_month();
            vm.go_prev_month();
            assert_eq!(vm.calendar_month.get(), start);
            view! { <div>"ok"</div> }
        });
    }

    #[test]
    fn submitting_an_invalid_form_surfaces_a_validation_error() {
        let _html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Employee)));
            let vm = use_leave_workflow_view_model();
            vm.submit_request();
            assert!(vm.action_error.get().is_some());
            assert!(vm.create_action.value().get().is_none());
            view! { <div>"ok"</div> }
        });
    }
}
