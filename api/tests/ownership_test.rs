//! Ownership rules over HTTP: attendance amendments and message edits.

mod common;

use actix_web::{http::StatusCode, test};

use common::{register_payload, test_state};
use sm_api::app::create_app;

/// POSTs a JSON body, optionally authenticated, and yields the response.
macro_rules! post_json {
    ($app:expr, $uri:expr, $token:expr, $body:expr) => {{
        let mut req = test::TestRequest::post().uri($uri).set_json($body);
        if let Some(token) = $token {
            req = req.insert_header(("Authorization", format!("Bearer {}", token)));
        }
        test::call_service($app, req.to_request()).await
    }};
}

/// Logs in and yields the access token.
macro_rules! login {
    ($app:expr, $email:expr, $password:expr) => {{
        let resp = post_json!(
            $app,
            "/api/login",
            None::<&str>,
            serde_json::json!({ "email": $email, "password": $password })
        );
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        body["accessToken"].as_str().unwrap().to_string()
    }};
}

fn profile_payload(firstname: &str, email: &str) -> serde_json::Value {
    serde_json::json!({
        "firstname": firstname,
        "lastname": "Example",
        "email": email,
        "password": "a-long-password",
        "gender": "male",
    })
}

#[actix_web::test]
async fn test_attendance_amendments_follow_ownership() {
    let state = test_state();
    let app = test::init_service(create_app(state)).await;

    // Admin sets up a school with two teachers and one student.
    let resp = post_json!(
        &app,
        "/api/register",
        None::<&str>,
        register_payload("admin@one.edu", "School One")
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let admin: serde_json::Value = test::read_body_json(resp).await;
    let admin_token = admin["accessToken"].as_str().unwrap().to_string();

    for (name, email) in [("First", "t1@one.edu"), ("Second", "t2@one.edu")] {
        let resp = post_json!(
            &app,
            "/api/teacher",
            Some(&admin_token),
            profile_payload(name, email)
        );
        assert_eq!(resp.status(), StatusCode::OK);
    }
    let resp = post_json!(
        &app,
        "/api/student",
        Some(&admin_token),
        profile_payload("Pupil", "pupil@one.edu")
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let student: serde_json::Value = test::read_body_json(resp).await;
    let student_id = student["id"].as_str().unwrap().to_string();

    // The first teacher takes attendance.
    let author_token = login!(&app, "t1@one.edu", "a-long-password");
    let resp = post_json!(
        &app,
        "/api/attendance",
        Some(&author_token),
        serde_json::json!({
            "studentId": student_id,
            "subject": "Mathematics",
            "date": chrono::Utc::now(),
            "kind": "absent",
        })
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let record: serde_json::Value = test::read_body_json(resp).await;
    let record_id = record["id"].as_str().unwrap().to_string();

    let amendment = serde_json::json!({ "kind": "leave", "description": "sick note" });

    // A different teacher is not the author.
    let other_token = login!(&app, "t2@one.edu", "a-long-password");
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/attendance/{}", record_id))
            .insert_header(("Authorization", format!("Bearer {}", other_token)))
            .set_json(amendment.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // The author may amend.
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/attendance/{}", record_id))
            .insert_header(("Authorization", format!("Bearer {}", author_token)))
            .set_json(amendment.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    // A same-school admin may too.
    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/attendance/{}", record_id))
            .insert_header(("Authorization", format!("Bearer {}", admin_token)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_student_sees_own_attendance_summary() {
    let state = test_state();
    let app = test::init_service(create_app(state)).await;

    let resp = post_json!(
        &app,
        "/api/register",
        None::<&str>,
        register_payload("admin@one.edu", "School One")
    );
    let admin: serde_json::Value = test::read_body_json(resp).await;
    let admin_token = admin["accessToken"].as_str().unwrap().to_string();

    post_json!(
        &app,
        "/api/teacher",
        Some(&admin_token),
        profile_payload("Teach", "teach@one.edu")
    );
    let resp = post_json!(
        &app,
        "/api/student",
        Some(&admin_token),
        profile_payload("Pupil", "pupil@one.edu")
    );
    let student: serde_json::Value = test::read_body_json(resp).await;
    let student_id = student["id"].as_str().unwrap().to_string();

    let teacher_token = login!(&app, "teach@one.edu", "a-long-password");
    for kind in ["present", "present", "absent"] {
        let resp = post_json!(
            &app,
            "/api/attendance",
            Some(&teacher_token),
            serde_json::json!({
                "studentId": student_id,
                "subject": "History",
                "date": chrono::Utc::now(),
                "kind": kind,
            })
        );
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let student_token = login!(&app, "pupil@one.edu", "a-long-password");
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/attendances")
            .insert_header(("Authorization", format!("Bearer {}", student_token)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let summary: serde_json::Value = test::read_body_json(resp).await;
    let entries = summary.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["subject"], "History");
    assert_eq!(entries[0]["total"], 3);
    assert_eq!(entries[0]["present"], 2);
    assert_eq!(entries[0]["absent"], 1);
}

#[actix_web::test]
async fn test_messages_are_editable_only_by_author() {
    let state = test_state();
    let app = test::init_service(create_app(state)).await;

    let resp = post_json!(
        &app,
        "/api/register",
        None::<&str>,
        register_payload("admin@one.edu", "School One")
    );
    let admin: serde_json::Value = test::read_body_json(resp).await;
    let admin_token = admin["accessToken"].as_str().unwrap().to_string();

    let resp = post_json!(
        &app,
        "/api/teacher",
        Some(&admin_token),
        profile_payload("Author", "author@one.edu")
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let author_token = login!(&app, "author@one.edu", "a-long-password");

    // The teacher posts a message.
    let resp = post_json!(
        &app,
        "/api/message",
        Some(&author_token),
        serde_json::json!({ "title": "Sports day", "body": "Friday at 10" })
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let message: serde_json::Value = test::read_body_json(resp).await;
    let message_id = message["id"].as_str().unwrap().to_string();

    let edit = serde_json::json!({ "title": "Sports day moved", "body": "Monday at 10" });

    // Even the admin is not the author.
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/message/{}", message_id))
            .insert_header(("Authorization", format!("Bearer {}", admin_token)))
            .set_json(edit.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // The author edits fine, and everyone in the school can read it.
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/message/{}", message_id))
            .insert_header(("Authorization", format!("Bearer {}", author_token)))
            .set_json(edit)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/messages")
            .insert_header(("Authorization", format!("Bearer {}", admin_token)))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let list: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["title"], "Sports day moved");
}
