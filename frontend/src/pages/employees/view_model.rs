use std::rc::Rc;

use leptos::*;

use super::repository::EmployeeRepository;
use super::utils::{EmployeeFilterSnapshot, EmployeeFilterState, EmployeeFormState};
use crate::api::{
    ApiClient, ApiError, DepartmentResponse, EmployeePayload, EmployeeResponse, PositionResponse,
};

#[derive(Clone, Default)]
pub enum EmployeeModal {
    #[default]
    None,
    Form {
        editing: Option<EmployeeResponse>,
    },
    ConfirmDelete {
        employee: EmployeeResponse,
    },
}

impl EmployeeModal {
    pub fn is_none(&self) -> bool {
        matches!(self, EmployeeModal::None)
    }
}

#[derive(Clone)]
pub struct SavePayload {
    pub id: Option<String>,
    pub payload: EmployeePayload,
}

#[derive(Clone)]
pub struct EmployeesViewModel {
    pub repository: EmployeeRepository,
    pub filters: EmployeeFilterState,
    pub reload: RwSignal<u32>,
    pub employees_resource:
        Resource<(EmployeeFilterSnapshot, u32), Result<Vec<EmployeeResponse>, ApiError>>,
    pub departments_resource: Resource<(), Vec<DepartmentResponse>>,
    pub positions_resource: Resource<(), Vec<PositionResponse>>,
    pub modal: RwSignal<EmployeeModal>,
    pub form: EmployeeFormState,
    pub save_action: Action<SavePayload, Result<EmployeeResponse, ApiError>>,
    pub delete_action: Action<String, Result<(), ApiError>>,
    pub action_error: RwSignal<Option<ApiError>>,
    pub action_notice: RwSignal<Option<String>>,
}

impl EmployeesViewModel {
    pub fn open_create_modal(&self) {
        self.form.reset();
        self.action_error.set(None);
        self.modal.set(EmployeeModal::Form { editing: None });
    }

    pub fn open_edit_modal(&self, employee: EmployeeResponse) {
        self.form.load(&employee);
        self.action_error.set(None);
        self.modal.set(EmployeeModal::Form {
            editing: Some(employee),
        });
    }

    pub fn open_delete_modal(&self, employee: EmployeeResponse) {
        self.action_error.set(None);
        self.modal.set(EmployeeModal::ConfirmDelete { employee });
    }

    pub fn close_modal(&self) {
        self.modal.set(EmployeeModal::None);
    }

    pub fn submit_form(&self) {
        let EmployeeModal::Form { editing } = self.modal.get_untracked() else {
            return;
        };
        match self.form.to_payload() {
            Ok(payload) => {
                self.action_error.set(None);
                self.save_action.dispatch(SavePayload {
                    id: editing.map(|employee| employee.id),
                    payload,
                });
            }
            Err(err) => self.action_error.set(Some(err)),
        }
    }

    pub fn confirm_delete(&self) {
        let EmployeeModal::ConfirmDelete { employee } = self.modal.get_untracked() else {
            return;
        };
        self.delete_action.dispatch(employee.id);
    }

    pub fn refresh(&self) {
        self.reload.update(|token| *token = token.wrapping_add(1));
    }
}

pub fn use_employees_view_model() -> EmployeesViewModel {
    if let Some(vm) = use_context::<EmployeesViewModel>() {
        return vm;
    }

    let api = use_context::<ApiClient>().unwrap_or_default();
    let repository = EmployeeRepository::new_with_client(Rc::new(api));

    let filters = EmployeeFilterState::new();
    let reload = create_rw_signal(0u32);
    let modal = create_rw_signal(EmployeeModal::None);
    let form = EmployeeFormState::new();
    let action_error = create_rw_signal(None::<ApiError>);
    let action_notice = create_rw_signal(None::<String>);

    let repo_for_list = repository.clone();
    let employees_resource = create_resource(
        move || (filters.snapshot(), reload.get()),
        move |(snapshot, _)| {
            let repo = repo_for_list.clone();
            async move {
                repo.fetch(
                    snapshot.search.as_deref(),
                    snapshot.department_id.as_deref(),
                    snapshot.status.as_deref(),
                )
                .await
            }
        },
    );

    let repo_for_departments = repository.clone();
    let departments_resource = create_resource(
        || (),
        move |_| {
            let repo = repo_for_departments.clone();
            async move {
                repo.departments().await.unwrap_or_else(|err| {
                    log::warn!("Failed to load departments: {err}");
                    Vec::new()
                })
            }
        },
    );

    let repo_for_positions = repository.clone();
    let positions_resource = create_resource(
        || (),
        move |_| {
            let repo = repo_for_positions.clone();
            async move {
                repo.positions().await.unwrap_or_else(|err| {
                    log::warn!("Failed to load positions: {err}");
                    Vec::new()
                })
            }
        },
    );

    let repo_for_save = repository.clone();
    let save_action = create_action(move |payload: &SavePayload| {
        let repo = repo_for_save.clone();
        let payload = payload.clone();
        async move { repo.save(payload.id.as_deref(), &payload.payload).await }
    });

    let repo_for_delete = repository.clone();
    let delete_action = create_action(move |id: &String| {
        let repo = repo_for_delete.clone();
        let id = id.clone();
        async move { repo.remove(&id).await }
    });

    create_effect(move |_| {
        if let Some(result) = save_action.value().get() {
            match result {
                Ok(saved) => {
                    action_notice.set(Some(format!("Saved {}.", saved.display_name())));
                    modal.set(EmployeeModal::None);
                    form.reset();
                    reload.update(|token| *token = token.wrapping_add(1));
                }
                Err(err) => action_error.set(Some(err)),
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = delete_action.value().get() {
            match result {
                Ok(()) => {
                    action_notice.set(Some("Employee removed.".to_string()));
                    modal.set(EmployeeModal::None);
                    reload.update(|token| *token = token.wrapping_add(1));
                }
                Err(err) => action_error.set(Some(err)),
            }
        }
    });

    let vm = EmployeesViewModel {
        repository,
        filters,
        reload,
        employees_resource,
        departments_resource,
        positions_resource,
        modal,
        form,
        save_action,
        delete_action,
        action_error,
        action_notice,
    };
    provide_context(vm.clone());
    vm
}
