mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

const JOB: &[(&str, &str)] = &[
    ("title", "Repair the rover"),
    ("team_leader", "1"),
    ("work_size", "20"),
    ("collaborators", "2, 3"),
    ("hazard_category", "1"),
];

#[tokio::test]
async fn only_owner_changes_job() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };

    // On an empty database the first account becomes the superuser
    common::register(server, &common::session_client()?, &common::unique_email("first")).await?;

    let owner = common::session_client()?;
    common::register(server, &owner, &common::unique_email("owner")).await?;
    let other = common::session_client()?;
    common::register(server, &other, &common::unique_email("other")).await?;

    let res = owner.post(server.url("/add_job")).form(JOB).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let job: Value = res.json().await?;
    let id = job["data"]["id"].as_i64().unwrap();

    let edit = [
        ("title", "Repair the antenna"),
        ("team_leader", "2"),
        ("work_size", "5"),
        ("collaborators", "4"),
        ("hazard_category", "3"),
        ("is_finished", "y"),
    ];

    let res = other.post(server.url(&format!("/edit_job/{id}"))).form(&edit).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = other.get(server.url(&format!("/job_delete/{id}"))).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = owner.post(server.url(&format!("/edit_job/{id}"))).form(&edit).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated["data"]["title"], "Repair the antenna");
    assert_eq!(updated["data"]["is_finished"], true);

    let res = owner.get(server.url(&format!("/job_delete/{id}"))).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = owner.get(server.url(&format!("/edit_job/{id}"))).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn invalid_number_creates_nothing() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = common::session_client()?;
    common::register(server, &client, &common::unique_email("invalid")).await?;
    let title = common::unique_email("job");

    let res = client
        .post(server.url("/add_job"))
        .form(&[
            ("title", title.as_str()),
            ("team_leader", "1"),
            ("work_size", "a lot"),
            ("collaborators", "2"),
            ("hazard_category", "1"),
        ])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let listing: Value = reqwest::get(server.url("/")).await?.json().await?;
    let records = listing["data"]["records"].as_array().unwrap();
    assert!(records.iter().all(|job| job["title"] != title.as_str()));
    Ok(())
}

#[tokio::test]
async fn department_lifecycle() -> Result<()> {
    let Some(server) = common::ensure_server().await? else {
        return Ok(());
    };
    let client = common::session_client()?;
    common::register(server, &client, &common::unique_email("dept")).await?;

    let res = client
        .post(server.url("/add_department"))
        .form(&[
            ("title", "Geology"),
            ("chief", "1"),
            ("members", "2, 3"),
            ("email", "geology@mars.test"),
        ])
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let id = res.json::<Value>().await?["data"]["id"].as_i64().unwrap();

    let res = client.get(server.url(&format!("/edit_department/{id}"))).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.post(server.url(&format!("/delete_department/{id}"))).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let listing: Value = reqwest::get(server.url("/departments")).await?.json().await?;
    let records = listing["data"]["records"].as_array().unwrap();
    assert!(records.iter().all(|d| d["id"] != id));
    Ok(())
}
