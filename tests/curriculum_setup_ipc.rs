
use serde_json::json;
use test_support::{request_err, request_ok, spawn_sidecar, temp_dir};

#[test]
fn setup_rejects_invalid_semester_counts() {
    let workspace = temp_dir("mallad-setup-validation");
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    for (i, count) in [
        json!(0),
        json!(-3),
        json!("six"),
        json!(null),
        // Counts past u32 must be rejected, not silently truncated into a
        // degenerate zero-semester grid.
        json!(4_294_967_296_u64),
        json!(4_294_967_297_u64),
    ]
    .into_iter()
    .enumerate()
    {
        let code = request_err(
            &mut stdin,
            &mut reader,
            &format!("bad-{}", i),
            "curriculum.create",
            json!({ "semesterCount": count, "careerName": "CS" }),
        );
        assert_eq!(code, "bad_params");
    }
    let code = request_err(
        &mut stdin,
        &mut reader,
        "missing",
        "curriculum.create",
        json!({ "careerName": "CS" }),
    );
    assert_eq!(code, "bad_params");

    // Nothing was created by the rejected attempts.
    let got = request_ok(&mut stdin, &mut reader, "get", "curriculum.get", json!({}));
    assert_eq!(got.get("exists").and_then(|v| v.as_bool()), Some(false));

    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn blank_career_name_gets_a_placeholder() {
    let workspace = temp_dir("mallad-setup-placeholder");
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let created = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "curriculum.create",
        json!({ "semesterCount": 2, "careerName": "   " }),
    );
    assert_eq!(
        created.pointer("/view/careerName").and_then(|v| v.as_str()),
        Some("Untitled career")
    );

    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn second_create_is_rejected() {
    let workspace = temp_dir("mallad-setup-once");
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "curriculum.create",
        json!({ "semesterCount": 3, "careerName": "CS" }),
    );
    let code = request_err(
        &mut stdin,
        &mut reader,
        "3",
        "curriculum.create",
        json!({ "semesterCount": 5, "careerName": "EE" }),
    );
    assert_eq!(code, "curriculum_exists");

    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn actions_require_workspace_then_curriculum() {
    let workspace = temp_dir("mallad-setup-order");
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let code = request_err(
        &mut stdin,
        &mut reader,
        "1",
        "courses.add",
        json!({ "semester": 1, "name": "Calc1" }),
    );
    assert_eq!(code, "no_workspace");
    let code = request_err(&mut stdin, &mut reader, "2", "curriculum.get", json!({}));
    assert_eq!(code, "no_workspace");

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let code = request_err(
        &mut stdin,
        &mut reader,
        "4",
        "courses.add",
        json!({ "semester": 1, "name": "Calc1" }),
    );
    assert_eq!(code, "no_curriculum");

    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn curriculum_survives_a_restart() {
    let workspace = temp_dir("mallad-setup-restart");

    {
        let (mut child, mut stdin, mut reader) = spawn_sidecar();
        let _ = request_ok(
            &mut stdin,
            &mut reader,
            "1",
            "workspace.select",
            json!({ "path": workspace.to_string_lossy() }),
        );
        let _ = request_ok(
            &mut stdin,
            &mut reader,
            "2",
            "curriculum.create",
            json!({ "semesterCount": 3, "careerName": "CS" }),
        );
        let added = request_ok(
            &mut stdin,
            &mut reader,
            "3",
            "courses.add",
            json!({ "semester": 1, "name": "Calc1" }),
        );
        let calc1 = added
            .get("courseId")
            .and_then(|v| v.as_str())
            .expect("courseId")
            .to_string();
        let _ = request_ok(
            &mut stdin,
            &mut reader,
            "4",
            "courses.toggleComplete",
            json!({ "courseId": calc1 }),
        );
        drop(stdin);
        let _ = child.wait();
    }

    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let selected = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    assert_eq!(
        selected.get("hasCurriculum").and_then(|v| v.as_bool()),
        Some(true)
    );

    let got = request_ok(&mut stdin, &mut reader, "6", "curriculum.get", json!({}));
    assert_eq!(got.get("exists").and_then(|v| v.as_bool()), Some(true));
    let view = got.get("view").expect("view");
    assert_eq!(
        view.get("careerName").and_then(|v| v.as_str()),
        Some("CS")
    );
    let calc1 = test_support::find_course(view, "Calc1");
    assert_eq!(calc1.get("completed").and_then(|v| v.as_bool()), Some(true));
    assert_eq!(
        view.pointer("/semesters/0/completed").and_then(|v| v.as_bool()),
        Some(true),
        "single completed course completes its semester"
    );

    let _ = std::fs::remove_dir_all(workspace);
}
