use leptos::*;

use crate::api::{ApiError, EmployeePayload, EmployeeResponse};
use crate::utils::time::parse_date_input;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeFilterSnapshot {
    pub search: Option<String>,
    pub department_id: Option<String>,
    pub status: Option<String>,
}

#[derive(Clone, Copy)]
pub struct EmployeeFilterState {
    search: RwSignal<String>,
    department_id: RwSignal<String>,
    status: RwSignal<String>,
}

impl EmployeeFilterState {
    pub fn new() -> Self {
        Self {
            search: create_rw_signal(String::new()),
            department_id: create_rw_signal(String::new()),
            status: create_rw_signal(String::new()),
        }
    }

    pub fn search_signal(&self) -> RwSignal<String> {
        self.search
    }

    pub fn department_signal(&self) -> RwSignal<String> {
        self.department_id
    }

    pub fn status_signal(&self) -> RwSignal<String> {
        self.status
    }

    pub fn snapshot(&self) -> EmployeeFilterSnapshot {
        let non_empty = |signal: RwSignal<String>| {
            let value = signal.get();
            let value = value.trim();
            if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        };
        EmployeeFilterSnapshot {
            search: non_empty(self.search),
            department_id: non_empty(self.department_id),
            status: non_empty(self.status),
        }
    }
}

#[derive(Clone, Copy)]
pub struct EmployeeFormState {
    pub first_name: RwSignal<String>,
    pub last_name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub department_id: RwSignal<String>,
    pub position_id: RwSignal<String>,
    pub salary: RwSignal<String>,
    pub hire_date: RwSignal<String>,
    pub status: RwSignal<String>,
}

impl EmployeeFormState {
    pub fn new() -> Self {
        Self {
            first_name: create_rw_signal(String::new()),
            last_name: create_rw_signal(String::new()),
            email: create_rw_signal(String::new()),
            department_id: create_rw_signal(String::new()),
            position_id: create_rw_signal(String::new()),
            salary: create_rw_signal(String::new()),
            hire_date: create_rw_signal(String::new()),
            status: create_rw_signal("active".to_string()),
        }
    }

    pub fn reset(&self) {
        self.first_name.set(String::new());
        self.last_name.set(String::new());
        self.email.set(String::new());
        self.department_id.set(String::new());
        self.position_id.set(String::new());
        self.salary.set(String::new());
        self.hire_date.set(String::new());
        self.status.set("active".to_string());
    }

    pub fn load(&self, employee: &EmployeeResponse) {
        let (first, last) = match (&employee.first_name, &employee.last_name) {
            (Some(first), Some(last)) => (first.clone(), last.clone()),
            _ => {
                let name = employee.name.clone().unwrap_or_default();
                let mut parts = name.splitn(2, ' ');
                (
                    parts.next().unwrap_or_default().to_string(),
                    parts.next().unwrap_or_default().to_string(),
                )
            }
        };
        self.first_name.set(first);
        self.last_name.set(last);
        self.email.set(employee.email.clone().unwrap_or_default());
        self.department_id.set(
            employee
                .department
                .as_ref()
                .and_then(|d| d.id.clone())
                .unwrap_or_default(),
        );
        self.position_id.set(
            employee
                .position
                .as_ref()
                .and_then(|p| p.id.clone())
                .unwrap_or_default(),
        );
        self.salary.set(
            employee
                .salary
                .map(|salary| format!("{salary}"))
                .unwrap_or_default(),
        );
        self.hire_date.set(
            employee
                .hire_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        );
        self.status
            .set(employee.status.clone().unwrap_or_else(|| "active".into()));
    }

    pub fn to_payload(&self) -> Result<EmployeePayload, ApiError> {
        let first_name = self.first_name.get();
        let first_name = first_name.trim();
        if first_name.is_empty() {
            return Err(ApiError::validation("First name is required."));
        }
        let last_name = self.last_name.get();
        let last_name = last_name.trim();
        if last_name.is_empty() {
            return Err(ApiError::validation("Last name is required."));
        }
        let email = self.email.get();
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(ApiError::validation("Please enter a valid email address."));
        }

        let salary = {
            let raw = self.salary.get();
            let raw = raw.trim().to_string();
            if raw.is_empty() {
                None
            } else {
                Some(
                    raw.parse::<f64>()
                        .map_err(|_| ApiError::validation("Salary must be a number."))?,
                )
            }
        };
        if let Some(salary) = salary {
            if salary < 0.0 {
                return Err(ApiError::validation("Salary cannot be negative."));
            }
        }

        let hire_date = {
            let raw = self.hire_date.get();
            if raw.trim().is_empty() {
                None
            } else {
                Some(
                    parse_date_input(&raw)
                        .ok_or_else(|| ApiError::validation("Hire date must be YYYY-MM-DD."))?,
                )
            }
        };

        let non_empty = |signal: RwSignal<String>| {
            let value = signal.get();
            let value = value.trim();
            if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        };

        Ok(EmployeePayload {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            department_id: non_empty(self.department_id),
            position_id: non_empty(self.position_id),
            salary,
            hire_date,
            status: non_empty(self.status),
        })
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;

    #[test]
    fn filter_snapshot_drops_blank_values() {
        with_runtime(|| {
            let filters = EmployeeFilterState::new();
            filters.search_signal().set("  ".into());
            filters.department_signal().set("engineering".into());
            let snapshot = filters.snapshot();
            assert!(snapshot.search.is_none());
            assert_eq!(snapshot.department_id.as_deref(), Some("engineering"));
        });
    }

    #[test]
    fn form_validates_required_fields() {
        with_runtime(|| {
            let form = EmployeeFormState::new();
            assert!(form.to_payload().is_err());

            form.first_name.set("Mike".into());
            form.last_name.set("Employee".into());
            form.email.set("not-an-email".into());
            assert!(form.to_payload().is_err());

            form.email.set("mike@example.com".into());
            form.salary.set("95000".into());
            let payload = form.to_payload().unwrap();
            assert_eq!(payload.first_name, "Mike");
            assert_eq!(payload.salary, Some(95000.0));
            assert_eq!(payload.status.as_deref(), Some("active"));
        });
    }

    #[test]
    fn form_rejects_bad_salary_and_dates() {
        with_runtime(|| {
            let form = EmployeeFormState::new();
            form.first_name.set("Mike".into());
            form.last_name.set("Employee".into());
            form.email.set("mike@example.com".into());
            form.salary.set("lots".into());
            assert!(form.to_payload().is_err());

            form.salary.set("-5".into());
            assert!(form.to_payload().is_err());

            form.salary.set(String::new());
            form.hire_date.set("October 1st".into());
            assert!(form.to_payload().is_err());
        });
    }

    #[test]
    fn form_load_splits_legacy_single_name() {
        with_runtime(|| {
            let employee: EmployeeResponse = serde_json::from_value(serde_json::json!({
                "id": "9",
                "name": "Alex Rodriguez",
                "email": "alex@example.com",
                "salary": 72000
            }))
            .unwrap();
            let form = EmployeeFormState::new();
            form.load(&employee);
            assert_eq!(form.first_name.get(), "Alex");
            assert_eq!(form.last_name.get(), "Rodriguez");
            assert_eq!(form.email.get(), "alex@example.com");
        });
    }
}
