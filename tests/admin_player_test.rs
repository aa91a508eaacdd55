use reqwest::{Client, Method};
use serde_json::json;
use uuid::Uuid;

mod common;
use common::utils::spawn_app;
use common::tournament_helpers::*;

#[tokio::test]
async fn admin_create_player_joins_team() {
    // Arrange
    let test_app = spawn_app().await;
    let client = Client::new();
    let team_id = create_team(&client, &test_app.address, "Harbour Town", "A").await;

    // Act
    let response = send_json(
        &client,
        Method::POST,
        &format!("{}/admin/players", test_app.address),
        Some(json!({ "name": " Ada Striker ", "team_id": team_id })),
    )
    .await;

    // Assert
    assert_eq!(201, response.status().as_u16());
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!("Ada Striker", body["data"]["name"]);
    assert_eq!(team_id.as_str(), body["data"]["team_id"]);
}

#[tokio::test]
async fn admin_create_player_for_unknown_team_returns_404() {
    let test_app = spawn_app().await;
    let client = Client::new();

    let response = send_json(
        &client,
        Method::POST,
        &format!("{}/admin/players", test_app.address),
        Some(json!({ "name": "Nobody", "team_id": Uuid::new_v4() })),
    )
    .await;

    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn admin_create_player_rejects_blank_name() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let team_id = create_team(&client, &test_app.address, "Harbour Town", "A").await;

    let response = send_json(
        &client,
        Method::POST,
        &format!("{}/admin/players", test_app.address),
        Some(json!({ "name": "", "team_id": team_id })),
    )
    .await;

    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn admin_list_players_includes_goal_counts() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let (home, home_player, away, away_player) = two_team_setup(&client, &test_app.address).await;
    let match_id = create_match(&client, &test_app.address, &home, &away, None).await;
    record_result(&client, &test_app.address, &match_id, 2, 0, goals(&home, &[&home_player, &home_player], &away, &[])).await;

    let (status, body) = get_json(&client, &format!("{}/admin/players", test_app.address)).await;

    assert_eq!(200, status);
    let players = body["data"].as_array().unwrap();
    assert_eq!(2, players.len());
    // Ordered by team name: Harbour Town before Valley Rovers
    assert_eq!(home_player.as_str(), players[0]["id"]);
    assert_eq!("Harbour Town", players[0]["team_name"]);
    assert_eq!(2, players[0]["goal_count"]);
    assert_eq!(away_player.as_str(), players[1]["id"]);
    assert_eq!(0, players[1]["goal_count"]);

    let (status, body) = get_json(&client, &format!("{}/admin/players?team_id={}", test_app.address, away)).await;
    assert_eq!(200, status);
    assert_eq!(1, body["data"].as_array().unwrap().len());

    let (status, body) = get_json(&client, &format!("{}/admin/players?search=ada", test_app.address)).await;
    assert_eq!(200, status);
    assert_eq!("Ada Striker", body["data"][0]["name"]);
}

#[tokio::test]
async fn admin_delete_player_with_goals_is_a_conflict() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let (home, home_player, away, away_player) = two_team_setup(&client, &test_app.address).await;
    let match_id = create_match(&client, &test_app.address, &home, &away, None).await;
    record_result(&client, &test_app.address, &match_id, 1, 0, goals(&home, &[&home_player], &away, &[])).await;

    let response = send_json(
        &client,
        Method::DELETE,
        &format!("{}/admin/players/{}", test_app.address, home_player),
        None,
    )
    .await;
    assert_eq!(409, response.status().as_u16());

    // The standings and goal are untouched
    assert_record(&team_record(&client, &test_app.address, &home).await, 1, 1, 0, 0, 1, 0, 3);

    let response = send_json(
        &client,
        Method::DELETE,
        &format!("{}/admin/players/{}", test_app.address, away_player),
        None,
    )
    .await;
    assert_eq!(200, response.status().as_u16());

    let response = send_json(
        &client,
        Method::DELETE,
        &format!("{}/admin/players/{}", test_app.address, away_player),
        None,
    )
    .await;
    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn racing_delete_and_result_keep_goals_consistent_with_scores() {
    // Arrange
    let test_app = spawn_app().await;
    let client = Client::new();
    let address = test_app.address.clone();
    let home = create_team(&client, &address, "Harbour Town", "A").await;
    let away = create_team(&client, &address, "Valley Rovers", "A").await;

    for round in 0..8 {
        let scorer = create_player(&client, &address, &format!("Scorer {}", round), &home).await;
        let match_id = create_match(&client, &address, &home, &away, None).await;

        // Act: credit the scorer and delete them at the same time
        let result_task = {
            let (client, address, home, away, scorer, match_id) =
                (client.clone(), address.clone(), home.clone(), away.clone(), scorer.clone(), match_id.clone());
            tokio::spawn(async move {
                record_result(&client, &address, &match_id, 1, 0, goals(&home, &[&scorer], &away, &[]))
                    .await
                    .status()
                    .as_u16()
            })
        };
        let delete_task = {
            let (client, address, scorer) = (client.clone(), address.clone(), scorer.clone());
            tokio::spawn(async move {
                send_json(&client, Method::DELETE, &format!("{}/admin/players/{}", address, scorer), None)
                    .await
                    .status()
                    .as_u16()
            })
        };
        let result_status = result_task.await.expect("Result task panicked");
        let delete_status = delete_task.await.expect("Delete task panicked");

        // Assert: exactly one side wins
        assert!(
            matches!((result_status, delete_status), (200, 409) | (404, 200)),
            "round {}: result {}, delete {}",
            round, result_status, delete_status
        );
    }

    let mismatched: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM matches m
        WHERE m.status = 'finished'
          AND m.home_score + m.away_score <> (SELECT COUNT(*) FROM goals g WHERE g.match_id = m.id)
        "#,
    )
    .fetch_one(&test_app.db_pool)
    .await
    .unwrap();
    assert_eq!(0, mismatched);
}
