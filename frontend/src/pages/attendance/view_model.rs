use std::rc::Rc;

use chrono::{Datelike, NaiveDate};
use leptos::{ev::MouseEvent, *};

use super::repository::AttendanceRepository;
use super::utils::RangeFormState;
use crate::api::{ApiClient, ApiError, AttendanceRecord, AttendanceSummary, CsvExport};
use crate::state::auth::use_auth;
use crate::utils::time::{month_bounds, today_in_app_tz};

#[derive(Clone, Copy, PartialEq, Eq)]
pub struct HistoryQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub token: u32,
}

impl HistoryQuery {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self {
            from,
            to,
            token: 0,
        }
    }

    pub fn with_range(self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self {
            from,
            to,
            token: self.token.wrapping_add(1),
        }
    }

    pub fn refresh(self) -> Self {
        Self {
            token: self.token.wrapping_add(1),
            ..self
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ClockDirection {
    In,
    Out,
}

#[derive(Clone)]
pub struct AttendanceViewModel {
    pub repository: AttendanceRepository,
    pub form_state: RangeFormState,
    pub history_query: RwSignal<HistoryQuery>,
    pub history_resource:
        Resource<(Option<String>, HistoryQuery), Result<Vec<AttendanceRecord>, ApiError>>,
    pub summary_resource: Resource<(Option<String>, u32), Result<AttendanceSummary, ApiError>>,
    pub clock_action: Action<ClockDirection, Result<AttendanceRecord, ApiError>>,
    pub export_action: Action<(Option<NaiveDate>, Option<NaiveDate>), Result<CsvExport, ApiError>>,
    pub range_error: RwSignal<Option<ApiError>>,
    pub clock_error: RwSignal<Option<ApiError>>,
    pub clock_message: RwSignal<Option<String>>,
    pub export_error: RwSignal<Option<ApiError>>,
    pub export_success: RwSignal<Option<String>>,
    pub current_user_id: Memo<Option<String>>,
}

pub fn use_attendance_view_model() -> AttendanceViewModel {
    if let Some(vm) = use_context::<AttendanceViewModel>() {
        return vm;
    }

    let (auth, _) = use_auth();
    let api = use_context::<ApiClient>().unwrap_or_default();
    let repository = AttendanceRepository::new_with_client(Rc::new(api));
    let current_user_id = create_memo(move |_| auth.get().user.map(|user| user.id));

    let initial_today = today_in_app_tz();
    let initial_range = month_bounds(initial_today);
    let form_state = RangeFormState::new();
    if let Some((first, last)) = initial_range {
        form_state.set_range(first, last);
    }

    let history_query = create_rw_signal(HistoryQuery::new(
        initial_range.map(|(first, _)| first),
        initial_range.map(|(_, last)| last),
    ));

    let repo_for_history = repository.clone();
    let history_resource = create_resource(
        move || (current_user_id.get(), history_query.get()),
        move |(user_id, query)| {
            let repo = repo_for_history.clone();
            async move {
                match user_id {
                    Some(user_id) => repo.fetch_range(&user_id, query.from, query.to).await,
                    None => Ok(Vec::new()),
                }
            }
        },
    );

    let reload_summary = create_rw_signal(0u32);
    let repo_for_summary = repository.clone();
    let summary_resource = create_resource(
        move || (current_user_id.get(), reload_summary.get()),
        move |(user_id, _)| {
            let repo = repo_for_summary.clone();
            async move {
                match user_id {
                    Some(user_id) => {
                        let today = today_in_app_tz();
                        repo.summary(&user_id, today.year(), today.month()).await
                    }
                    None => Err(ApiError::unknown("Not signed in")),
                }
            }
        },
    );

    let repo_for_clock = repository.clone();
    let clock_action = create_action(move |direction: &ClockDirection| {
        let repo = repo_for_clock.clone();
        let direction = *direction;
        let user_id = current_user_id.get_untracked();
        async move {
            let Some(user_id) = user_id else {
                return Err(ApiError::unknown("Not signed in"));
            };
            match direction {
                ClockDirection::In => repo.check_in(&user_id).await,
                ClockDirection::Out => repo.check_out(&user_id).await,
            }
        }
    });

    let repo_for_export = repository.clone();
    let export_action = create_action(
        move |(from, to): &(Option<NaiveDate>, Option<NaiveDate>)| {
            let repo = repo_for_export.clone();
            let from = *from;
            let to = *to;
            let user_id = current_user_id.get_untracked();
            async move {
                let Some(user_id) = user_id else {
                    return Err(ApiError::unknown("Not signed in"));
                };
                repo.export_csv(&user_id, from, to).await
            }
        },
    );

    let range_error = create_rw_signal(None);
    let clock_error = create_rw_signal(None);
    let clock_message = create_rw_signal(None);
    let export_error = create_rw_signal(None);
    let export_success = create_rw_signal(None);

    create_effect(move |_| {
        if let Some(result) = clock_action.value().get() {
            match result {
                Ok(record) => {
                    clock_error.set(None);
                    let message = if record.check_out.is_some() {
                        "Checked out. See you tomorrow!"
                    } else {
                        "Checked in. Have a productive day!"
                    };
                    clock_message.set(Some(message.to_string()));
                    reload_summary.update(|token| *token = token.wrapping_add(1));
                    history_query.update(|query| *query = query.refresh());
                }
                Err(err) => {
                    clock_message.set(None);
                    clock_error.set(Some(err));
                }
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = export_action.value().get() {
            match result {
                Ok(payload) => {
                    let filename = if payload.filename.is_empty() {
                        "my_attendance.csv".to_string()
                    } else {
                        payload.filename
                    };
                    match crate::utils::trigger_csv_download(&filename, &payload.csv_data) {
                        Ok(()) => export_success.set(Some(format!("Downloaded {filename}."))),
                        Err(err) => export_error.set(Some(ApiError::unknown(err))),
                    }
                }
                Err(err) => export_error.set(Some(err)),
            }
        }
    });

    let vm = AttendanceViewModel {
        repository,
        form_state,
        history_query,
        history_resource,
        summary_resource,
        clock_action,
        export_action,
        range_error,
        clock_error,
        clock_message,
        export_error,
        export_success,
        current_user_id,
    };
    provide_context(vm.clone());
    vm
}

impl AttendanceViewModel {
    pub fn on_select_current_month(&self) -> impl Fn(MouseEvent) {
        let form_state = self.form_state;
        let history_query = self.history_query;
        let range_error = self.range_error;
        move |_ev| {
            range_error.set(None);
            let today = today_in_app_tz();
            let Some((first_day, last_day)) = month_bounds(today) else {
                return;
            };
            form_state.set_range(first_day, last_day);
            history_query
                .update(|query| *query = query.with_range(Some(first_day), Some(last_day)));
        }
    }

    pub fn on_load_range(&self) -> impl Fn(MouseEvent) {
        let form_state = self.form_state;
        let history_query = self.history_query;
        let range_error = self.range_error;
        move |_ev| match form_state.to_payload() {
            Ok((from, to)) => {
                range_error.set(None);
                history_query.update(|query| *query = query.with_range(from, to));
            }
            Err(err) => range_error.set(Some(err)),
        }
    }

    pub fn on_export_csv(&self) -> impl Fn(MouseEvent) {
        let form_state = self.form_state;
        let export_action = self.export_action;
        let export_error = self.export_error;
        let export_success = self.export_success;
        move |_ev| {
            export_error.set(None);
            export_success.set(None);
            match form_state.to_payload() {
                Ok(range) => export_action.dispatch(range),
                Err(err) => export_error.set(Some(err)),
            }
        }
    }

    pub fn on_clock(&self, direction: ClockDirection) {
        self.clock_error.set(None);
        self.clock_action.dispatch(direction);
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::Role;
    use crate::test_support::helpers::{provide_auth, user_with_role};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn history_query_token_distinguishes_refreshes() {
        let base = HistoryQuery::new(None, None);
        let refreshed = base.refresh();
        assert_ne!(base, refreshed);
        let ranged = base.with_range(NaiveDate::from_ymd_opt(2024, 10, 1), None);
        assert_ne!(base, ranged);
        assert_eq!(ranged.from, NaiveDate::from_ymd_opt(2024, 10, 1));
    }

    #[test]
    fn view_model_seeds_the_current_month_range() {
        let _html = render_to_string(|| {
            provide_auth(Some(user_with_role(Role::Employee)));
            let vm = use_attendance_view_model();
            assert!(!vm.form_state.start_date.get().is_empty());
            assert!(!vm.form_state.end_date.get().is_empty());
            assert!(vm.range_error.get().is_none());
            view! { <div>"ok"</div> }
        });
    }
}
