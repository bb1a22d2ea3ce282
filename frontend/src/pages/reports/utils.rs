use crate::api::EmployeeResponse;

#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentRow {
    pub name: String,
    pub headcount: usize,
    pub average_salary: f64,
}

pub fn average_salary(employees: &[EmployeeResponse]) -> f64 {
    let salaries: Vec<f64> = employees.iter().filter_map(|e| e.salary).collect();
    if salaries.is_empty() {
        0.0
    } else {
        salaries.iter().sum::<f64>() / salaries.len() as f64
    }
}

pub fn highest_salary(employees: &[EmployeeResponse]) -> f64 {
    employees
        .iter()
        .filter_map(|e| e.salary)
        .fold(0.0, f64::max)
}

pub fn active_headcount(employees: &[EmployeeResponse]) -> usize {
    employees.iter().filter(|e| e.is_active()).count()
}

/// One row per department, ordered by headcount descending then name, so
/// the table is stable across refreshes. Employees without a department
/// are grouped under "Unassigned".
pub fn department_breakdown(employees: &[EmployeeResponse]) -> Vec<DepartmentRow> {
    let mut groups: std::collections::BTreeMap<String, Vec<&EmployeeResponse>> =
        std::collections::BTreeMap::new();
    for employee in employees {
        let name = employee
            .department_name()
            .unwrap_or("Unassigned")
            .to_string();
        groups.entry(name).or_default().push(employee);
    }
    let mut rows: Vec<DepartmentRow> = groups
        .into_iter()
        .map(|(name, members)| {
            let salaries: Vec<f64> = members.iter().filter_map(|e| e.salary).collect();
            let average_salary = if salaries.is_empty() {
                0.0
            } else {
                salaries.iter().sum::<f64>() / salaries.len() as f64
            };
            DepartmentRow {
                name,
                headcount: members.len(),
                average_salary,
            }
        })
        .collect();
    rows.sort_by(|a, b| b.headcount.cmp(&a.headcount).then(a.name.cmp(&b.name)));
    rows
}

pub fn department_csv(rows: &[DepartmentRow]) -> String {
    let mut csv = String::from("department,headcount,average_salary\n");
    for row in rows {
        let name = if row.name.contains(',') {
            format!("\"{}\"", row.name)
        } else {
            row.name.clone()
        };
        csv.push_str(&format!(
            "{},{},{:.2}\n",
            name, row.headcount, row.average_salary
        ));
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: &str, department: Option<&str>, salary: Option<f64>) -> EmployeeResponse {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "first_name": "E",
            "last_name": id,
            "department": department,
            "salary": salary,
            "status": "active"
        }))
        .unwrap()
    }

    #[test]
    fn averages_ignore_missing_salaries() {
        let employees = vec![
            employee("1", Some("Engineering"), Some(100_000.0)),
            employee("2", Some("Engineering"), None),
            employee("3", Some("Sales"), Some(60_000.0)),
        ];
        assert!((average_salary(&employees) - 80_000.0).abs() < f64::EPSILON);
        assert!((highest_salary(&employees) - 100_000.0).abs() < f64::EPSILON);
        assert_eq!(active_headcount(&employees), 3);
    }

    #[test]
    fn breakdown_groups_and_orders_departments() {
        let employees = vec![
            employee("1", Some("Engineering"), Some(100_000.0)),
            employee("2", Some("Engineering"), Some(90_000.0)),
            employee("3", Some("Sales"), Some(60_000.0)),
            employee("4", None, Some(50_000.0)),
        ];
        let rows = department_breakdown(&employees);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].name, "Engineering");
        assert_eq!(rows[0].headcount, 2);
        assert!((rows[0].average_salary - 95_000.0).abs() < f64::EPSILON);
        assert!(rows.iter().any(|row| row.name == "Unassigned"));
    }

    #[test]
    fn csv_quotes_names_with_commas() {
        let rows = vec![DepartmentRow {
            name: "Research, Development".into(),
            headcount: 4,
            average_salary: 88_000.0,
        }];
        let csv = department_csv(&rows);
        assert!(csv.starts_with("department,headcount,average_salary\n"));
        assert!(csv.contains("\"Research, Development\",4,88000.00"));
    }

    #[test]
    fn empty_inputs_produce_zeroes() {
        let none: Vec<EmployeeResponse> = Vec::new();
        assert_eq!(average_salary(&none), 0.0);
        assert_eq!(highest_salary(&none), 0.0);
        assert!(department_breakdown(&none).is_empty());
    }
}
