#![cfg(not(coverage))]

use super::test_support::mock::*;
use super::*;
use crate::utils::{nav, storage};
use chrono::NaiveDate;
use serde_json::json;

fn leave_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "employee_id": "3",
        "type": "vacation",
        "start_date": "2024-10-15",
        "end_date": "2024-10-19",
        "total_days": 5,
        "reason": "Family vacation",
        "status": status,
        "applied_date": "2024-09-25"
    })
}

fn leave_type_json(id: &str, name: &str, max_days: i64) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "max_days": max_days,
        "advance_notice_days": 3,
        "color": "#3B82F6"
    })
}

#[tokio::test]
async fn list_leaves_parses_records_and_total() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/leaves");
        then.status(200).json_body(json!({
            "leaves": [leave_json("1", "pending"), leave_json("2", "approved")],
            "total": 12
        }));
    });

    let api = ApiClient::new_with_base_url(server.url("/api"));
    let query = LeaveListQuery {
        status: Some(LeaveStatus::Pending),
        page: Some(1),
        limit: Some(10),
        ..LeaveListQuery::default()
    };
    let page = api.list_leaves(&query).await.unwrap();
    assert_eq!(page.leaves.len(), 2);
    assert_eq!(page.total, 12);
    assert_eq!(page.leaves[0].status, LeaveStatus::Pending);
}

#[tokio::test]
async fn create_leave_returns_a_pending_request_with_five_days() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/leaves");
        then.status(201).json_body(leave_json("10", "pending"));
    });

    let api = ApiClient::new_with_base_url(server.url("/api"));
    let payload = CreateLeavePayload {
        employee_id: "3".into(),
        leave_type_id: "vacation".into(),
        start_date: NaiveDate::from_ymd_opt(2024, 10, 15).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 10, 19).unwrap(),
        reason: "Family vacation".into(),
        emergency_contact: None,
        handover_notes: None,
    };
    let created = api.create_leave(&payload).await.unwrap();
    assert_eq!(created.status, LeaveStatus::Pending);
    assert_eq!(created.duration_days(), 5);
    assert_eq!(created.employee_id, "3");
}

#[tokio::test]
async fn set_status_maps_conflict_to_invalid_transition() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(PUT).path("/api/leaves/2/status");
        then.status(409)
            .json_body(json!({"message": "Leave request is not pending"}));
    });

    let api = ApiClient::new_with_base_url(server.url("/api"));
    let err = api
        .set_leave_status("2", LeaveDecision::Approve, "")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidTransition);
}

#[tokio::test]
async fn set_status_returns_the_updated_record() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(PUT).path("/api/leaves/1/status");
        then.status(200).json_body({
            let mut body = leave_json("1", "approved");
            body["approved_by"] = json!("hr-1");
            body["approved_date"] = json!("2024-10-01");
            body
        });
    });

    let api = ApiClient::new_with_base_url(server.url("/api"));
    let updated = api
        .set_leave_status("1", LeaveDecision::Approve, "enjoy")
        .await
        .unwrap();
    assert_eq!(updated.status, LeaveStatus::Approved);
    assert_eq!(updated.approved_by.as_deref(), Some("hr-1"));
}

#[tokio::test]
async fn bulk_action_reports_partial_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/leaves/bulk-action");
        then.status(200).json_body(json!({
            "results": [
                {"id": "1", "success": true},
                {"id": "2", "success": true},
                {"id": "missing", "success": false, "error": "Leave request not found"}
            ]
        }));
    });

    let api = ApiClient::new_with_base_url(server.url("/api"));
    let ids = vec!["1".to_string(), "2".to_string(), "missing".to_string()];
    let outcome = api
        .bulk_leave_action(LeaveDecision::Approve, &ids, "batch")
        .await
        .unwrap();
    assert_eq!(outcome.succeeded(), 2);
    assert_eq!(outcome.failed(), 1);
    assert_eq!(outcome.results[2].error.as_deref(), Some("Leave request not found"));
}

#[tokio::test]
async fn leave_types_statistics_and_balance_parse() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/leaves/types");
        then.status(200).json_body(json!([
            leave_type_json("vacation", "Vacation", 25),
            leave_type_json("sick", "Sick Leave", 12)
        ]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/leaves/statistics");
        then.status(200).json_body(json!({
            "total_requests": 25,
            "pending_count": 5,
            "approved_count": 18,
            "rejected_count": 2
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/leaves/balance/3");
        then.status(200).json_body(json!({
            "employee_id": "3",
            "year": 2024,
            "leave_types": {
                "vacation": {"allocated": 25.0, "used": 15.0, "pending": 3.0, "remaining": 7.0}
            },
            "total_days": {"allocated": 42.0, "used": 21.0, "pending": 4.0, "remaining": 17.0}
        }));
    });

    let api = ApiClient::new_with_base_url(server.url("/api"));

    let types = api.leave_types().await.unwrap();
    assert_eq!(types.len(), 2);
    assert_eq!(types[0].max_days, 25);

    let stats = api
        .leave_statistics(Some(2024), None, None, None)
        .await
        .unwrap();
    assert_eq!(stats.total_requests, 25);
    assert_eq!(
        stats.pending_count + stats.approved_count + stats.rejected_count,
        stats.total_requests
    );

    let balance = api.leave_balance("3", Some(2024)).await.unwrap();
    let vacation = balance.leave_types.get("vacation").unwrap();
    assert!(
        (vacation.allocated - (vacation.used + vacation.pending + vacation.remaining)).abs()
            < f64::EPSILON
    );
}

#[tokio::test]
async fn calendar_returns_scoped_requests() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/leaves/calendar");
        then.status(200)
            .json_body(json!([leave_json("1", "approved")]));
    });

    let api = ApiClient::new_with_base_url(server.url("/api"));
    let records = api
        .leave_calendar(
            NaiveDate::from_ymd_opt(2024, 9, 29).unwrap(),
            NaiveDate::from_ymd_opt(2024, 11, 9).unwrap(),
            None,
            None,
        )
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].covers(NaiveDate::from_ymd_opt(2024, 10, 17).unwrap()));
}

#[tokio::test]
async fn missing_leave_maps_to_not_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(DELETE).path("/api/leaves/999");
        then.status(404)
            .json_body(json!({"message": "Leave request not found"}));
    });

    let api = ApiClient::new_with_base_url(server.url("/api"));
    let err = api.cancel_leave("999").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn login_persists_session_and_expiry_clears_it() {
    let _guard = crate::test_support::session_lock()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/auth/login");
        then.status(200).json_body(json!({
            "token": "jwt-abc",
            "user": {"id": "u1", "name": "Sarah Admin", "email": "sarah@example.com", "role": "admin"}
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/auth/profile");
        then.status(401).json_body(json!({"message": "Token expired"}));
    });

    let api = ApiClient::new_with_base_url(server.url("/api"));
    let login = api
        .login(LoginRequest {
            email: "sarah@example.com".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();
    assert_eq!(login.user.role, Role::Admin);
    assert_eq!(storage::auth_token().as_deref(), Some("jwt-abc"));

    let err = api.get_profile().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthExpired);
    assert!(storage::auth_token().is_none());
    assert_eq!(nav::take_last_redirect().as_deref(), Some("/login"));
}

#[tokio::test]
async fn employee_and_catalog_areas_round_trip() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/employees");
        then.status(200).json_body(json!([
            {
                "id": 3,
                "first_name": "Mike",
                "last_name": "Employee",
                "email": "mike@example.com",
                "department": {"id": "engineering", "name": "Engineering"},
                "position": {"id": 9, "title": "Software Engineer"},
                "salary": 95000,
                "status": "active"
            }
        ]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/departments");
        then.status(200)
            .json_body(json!([{"id": "engineering", "name": "Engineering", "count": 12}]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/positions");
        then.status(200).json_body(json!([
            {"id": 9, "title": "Software Engineer", "department": "Engineering", "min_salary": 80000, "max_salary": 120000}
        ]));
    });

    let api = ApiClient::new_with_base_url(server.url("/api"));

    let employees = api.list_employees(None, None, None).await.unwrap();
    assert_eq!(employees[0].display_name(), "Mike Employee");
    assert_eq!(employees[0].id, "3");

    let departments = api.list_departments().await.unwrap();
    assert_eq!(departments[0].employee_count, Some(12));

    let positions = api.list_positions().await.unwrap();
    assert_eq!(positions[0].department.as_ref().unwrap().name, "Engineering");
}

#[tokio::test]
async fn attendance_area_round_trips() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/attendance/check-in");
        then.status(201).json_body(json!({
            "id": "att-1",
            "employee_id": "3",
            "date": "2024-10-15",
            "check_in": "09:02:11",
            "status": "present"
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/attendance/summary/3");
        then.status(200).json_body(json!({
            "year": 2024,
            "month": 10,
            "present_days": 20,
            "late_days": 2,
            "absent_days": 1,
            "total_work_hours": 161.5,
            "average_daily_hours": 8.1
        }));
    });

    let api = ApiClient::new_with_base_url(server.url("/api"));

    let record = api
        .check_in(&CheckInPayload {
            employee_id: "3".into(),
            date: NaiveDate::from_ymd_opt(2024, 10, 15).unwrap(),
            check_in: chrono::NaiveTime::from_hms_opt(9, 2, 11).unwrap(),
        })
        .await
        .unwrap();
    assert!(record.check_in.is_some());
    assert!(record.check_out.is_none());

    let summary = api.attendance_summary("3", 2024, 10).await.unwrap();
    assert_eq!(summary.present_days, 20);
}
