use leptos::*;

use crate::api::{ApiError, PositionPayload};

#[derive(Clone, Copy)]
pub struct PositionFormState {
    pub title: RwSignal<String>,
    pub department_id: RwSignal<String>,
    pub min_salary: RwSignal<String>,
    pub max_salary: RwSignal<String>,
    pub description: RwSignal<String>,
}

impl PositionFormState {
    pub fn new() -> Self {
        Self {
            title: create_rw_signal(String::new()),
            department_id: create_rw_signal(String::new()),
            min_salary: create_rw_signal(String::new()),
            max_salary: create_rw_signal(String::new()),
            description: create_rw_signal(String::new()),
        }
    }

    pub fn reset(&self) {
        self.title.set(String::new());
        self.department_id.set(String::new());
        self.min_salary.set(String::new());
        self.max_salary.set(String::new());
        self.description.set(String::new());
    }

    pub fn to_payload(&self) -> Result<PositionPayload, ApiError> {
        let title = self.title.get();
        let title = title.trim();
        if title.is_empty() {
            return Err(ApiError::validation("Title is required."));
        }

        let parse_salary = |signal: RwSignal<String>, label: &str| {
            let raw = signal.get();
            let raw = raw.trim().to_string();
            if raw.is_empty() {
                Ok(None)
            } else {
                raw.parse::<f64>()
                    .map(Some)
                    .map_err(|_| ApiError::validation(format!("{label} must be a number.")))
            }
        };
        let min_salary = parse_salary(self.min_salary, "Minimum salary")?;
        let max_salary = parse_salary(self.max_salary, "Maximum salary")?;
        if let (Some(min), Some(max)) = (min_salary, max_salary) {
            if max < min {
                return Err(ApiError::validation(
                    "Maximum salary must be at least the minimum.",
                ));
            }
        }

        let non_empty = |signal: RwSignal<String>| {
            let value = signal.get();
            let value = value.trim();
            if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        };

        Ok(PositionPayload {
            title: title.to_string(),
            department_id: non_empty(self.department_id),
            min_salary,
            max_salary,
            description: non_empty(self.description),
        })
    }
}
