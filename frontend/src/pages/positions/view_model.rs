use std::rc::Rc;

use leptos::*;

use super::repository::PositionRepository;
use super::utils::PositionFormState;
use crate::api::{ApiClient, ApiError, DepartmentResponse, PositionPayload, PositionResponse};

#[derive(Clone)]
pub struct PositionsViewModel {
    pub repository: PositionRepository,
    pub reload: RwSignal<u32>,
    pub positions_resource: Resource<u32, Result<Vec<PositionResponse>, ApiError>>,
    pub departments_resource: Resource<(), Vec<DepartmentResponse>>,
    pub form_open: RwSignal<bool>,
    pub form: PositionFormState,
    pub create_action: Action<PositionPayload, Result<PositionResponse, ApiError>>,
    pub delete_action: Action<String, Result<(), ApiError>>,
    pub delete_target: RwSignal<Option<PositionResponse>>,
    pub action_error: RwSignal<Option<ApiError>>,
    pub action_notice: RwSignal<Option<String>>,
}

impl PositionsViewModel {
    pub fn open_form(&self) {
        self.form.reset();
        self.action_error.set(None);
        self.form_open.set(true);
    }

    pub fn close_form(&self) {
        self.form_open.set(false);
    }

    pub fn submit_form(&self) {
        match self.form.to_payload() {
            Ok(payload) => {
                self.action_error.set(None);
                self.create_action.dispatch(payload);
            }
            Err(err) => self.action_error.set(Some(err)),
        }
    }

    pub fn request_delete(&self, position: PositionResponse) {
        self.delete_target.set(Some(position));
    }

    pub fn confirm_delete(&self) {
        if let Some(position) = self.delete_target.get_untracked() {
            self.delete_action.dispatch(position.id);
        }
    }

    pub fn cancel_delete(&self) {
        self.delete_target.set(None);
    }
}

pub fn use_positions_view_model() -> PositionsViewModel {
    if let Some(vm) = use_context::<PositionsViewModel>() {
        return vm;
    }

    let api = use_context::<ApiClient>().unwrap_or_default();
    let repository = PositionRepository::new_with_client(Rc::new(api));

    let reload = create_rw_signal(0u32);
    let form_open = create_rw_signal(false);
    let form = PositionFormState::new();
    let delete_target = create_rw_signal(None::<PositionResponse>);
    let action_error = create_rw_signal(None::<ApiError>);
    let action_notice = create_rw_signal(None::<String>);

    let repo_for_list = repository.clone();
    let positions_resource = create_resource(
        move || reload.get(),
        move |_| {
            let repo = repo_for_list.clone();
            async move { repo.positions().await }
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

    let repo_for_create = repository.clone();
    let create_action = create_action(move |payload: &PositionPayload| {
        let repo = repo_for_create.clone();
        let payload = payload.clone();
        async move { repo.create(&payload).await }
    });

    let repo_for_delete = repository.clone();
    let delete_action = leptos::create_action(move |id: &String| {
        let repo = repo_for_delete.clone();
        let id = id.clone();
        async move { repo.remove(&id).await }
    });

    create_effect(move |_| {
        if let Some(result) = create_action.value().get() {
            match result {
                Ok(created) => {
                    action_notice.set(Some(format!("Created position {}.", created.title)));
                    form.reset();
                    form_open.set(false);
                    reload.update(|token| *token = token.wrapping_add(1));
                }
                Err(err) => action_error.set(Some(err)),
            }
        }
    });

    create_effect(move |_| {
        if let Some(result) = delete_action.value().get() {
            delete_target.set(None);
            match result {
                Ok(()) => {
                    action_notice.set(Some("Position removed.".to_string()));
                    reload.update(|token| *token = token.wrapping_add(1));
                }
                Err(err) => action_error.set(Some(err)),
            }
        }
    });

    let vm = PositionsViewModel {
        repository,
        reload,
        positions_resource,
        departments_resource,
        form_open,
        form,
        create_action,
        delete_action,
        delete_target,
        action_error,
        action_notice,
    };
    provide_context(vm.clone());
    vm
}
