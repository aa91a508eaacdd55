use reqwest::{Client, Method};
use serde_json::json;
use uuid::Uuid;

mod common;
use common::utils::spawn_app;
use common::tournament_helpers::*;

#[tokio::test]
async fn home_page_splits_upcoming_and_recent_matches() {
    // Arrange
    let test_app = spawn_app().await;
    let client = Client::new();
    let (home, home_player, away, _) = two_team_setup(&client, &test_app.address).await;
    let played = create_match(&client, &test_app.address, &home, &away, None).await;
    let upcoming = create_match(&client, &test_app.address, &away, &home, None).await;
    record_result(&client, &test_app.address, &played, 1, 0, goals(&home, &[&home_player], &away, &[])).await;

    // Act
    let (status, body) = get_json(&client, &format!("{}/", test_app.address)).await;

    // Assert
    assert_eq!(200, status);
    let upcoming_matches = body["data"]["upcoming_matches"].as_array().unwrap();
    let recent_matches = body["data"]["recent_matches"].as_array().unwrap();
    assert_eq!(1, upcoming_matches.len());
    assert_eq!(upcoming.as_str(), upcoming_matches[0]["id"]);
    assert_eq!("Valley Rovers", upcoming_matches[0]["home_team_name"]);
    assert_eq!(1, recent_matches.len());
    assert_eq!(played.as_str(), recent_matches[0]["id"]);
    assert_eq!(1, recent_matches[0]["home_score"]);
}

#[tokio::test]
async fn fixtures_and_results_filter_by_group_and_stage() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let address = &test_app.address;
    let (home, home_player, away, _) = two_team_setup(&client, address).await;
    let b_one = create_team(&client, address, "Hill United", "B").await;
    let b_two = create_team(&client, address, "Lake Athletic", "B").await;

    let group_a = create_match(&client, address, &home, &away, None).await;
    create_match(&client, address, &b_one, &b_two, None).await;
    create_match(&client, address, &home, &b_one, Some("Semi Final")).await;
    record_result(&client, address, &group_a, 1, 0, goals(&home, &[&home_player], &away, &[])).await;

    let (status, body) = get_json(&client, &format!("{}/fixtures", address)).await;
    assert_eq!(200, status);
    assert_eq!(3, body["data"]["matches"].as_array().unwrap().len());
    assert_eq!(json!(["A", "B", "C", "D"]), body["data"]["groups"]);
    assert_eq!(json!(["Group Stage", "Semi Final"]), body["data"]["stages"]);
    assert!(body["data"]["selected_group"].is_null());

    let (status, body) = get_json(&client, &format!("{}/fixtures?group=b", address)).await;
    assert_eq!(200, status);
    assert_eq!(1, body["data"]["matches"].as_array().unwrap().len());
    assert_eq!("B", body["data"]["selected_group"]);

    // Teams from different groups meet without a group label
    let (_, body) = get_json(&client, &format!("{}/fixtures?stage=Semi%20Final", address)).await;
    let semis = body["data"]["matches"].as_array().unwrap();
    assert_eq!(1, semis.len());
    assert!(semis[0]["group"].is_null());
    assert_eq!("Semi Final", body["data"]["selected_stage"]);

    let (status, body) = get_json(&client, &format!("{}/results", address)).await;
    assert_eq!(200, status);
    let results = body["data"]["matches"].as_array().unwrap();
    assert_eq!(1, results.len());
    assert_eq!(group_a.as_str(), results[0]["id"]);

    let (status, _) = get_json(&client, &format!("{}/results?group=Z", address)).await;
    assert_eq!(400, status);
}

#[tokio::test]
async fn admin_match_list_filters_by_status() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let (home, home_player, away, _) = two_team_setup(&client, &test_app.address).await;
    let finished = create_match(&client, &test_app.address, &home, &away, None).await;
    create_match(&client, &test_app.address, &away, &home, None).await;
    record_result(&client, &test_app.address, &finished, 1, 0, goals(&home, &[&home_player], &away, &[])).await;

    let (status, body) = get_json(&client, &format!("{}/admin/matches?status=scheduled", test_app.address)).await;
    assert_eq!(200, status);
    let scheduled = body["data"].as_array().unwrap();
    assert_eq!(1, scheduled.len());
    assert_eq!("scheduled", scheduled[0]["status"]);

    let (status, _) = get_json(&client, &format!("{}/admin/matches?status=live", test_app.address)).await;
    assert_eq!(400, status);
}

#[tokio::test]
async fn top_scorers_are_ranked_by_goals_then_name() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let (home, home_player, away, away_player) = two_team_setup(&client, &test_app.address).await;
    let bench = create_player(&client, &test_app.address, "Bench Warmer", &home).await;
    let first = create_match(&client, &test_app.address, &home, &away, None).await;
    let second = create_match(&client, &test_app.address, &away, &home, None).await;

    record_result(&client, &test_app.address, &first, 2, 1, goals(&home, &[&home_player, &home_player], &away, &[&away_player])).await;
    record_result(&client, &test_app.address, &second, 1, 0, goals(&away, &[&away_player], &home, &[])).await;

    let (status, body) = get_json(&client, &format!("{}/top-scorers", test_app.address)).await;

    assert_eq!(200, status);
    let scorers = body["data"].as_array().unwrap();
    // Players without goals are left out; the 2-2 tie falls back to name order
    assert_eq!(2, scorers.len());
    assert_eq!("Ada Striker", scorers[0]["name"]);
    assert_eq!(2, scorers[0]["goals_scored"]);
    assert_eq!("Ben Winger", scorers[1]["name"]);
    assert_eq!("Valley Rovers", scorers[1]["team_name"]);
    assert!(scorers.iter().all(|s| s["player_id"] != bench.as_str()));
}

#[tokio::test]
async fn match_detail_lists_scorers() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let (home, home_player, away, away_player) = two_team_setup(&client, &test_app.address).await;
    let match_id = create_match(&client, &test_app.address, &home, &away, None).await;
    record_result(&client, &test_app.address, &match_id, 1, 1, goals(&home, &[&home_player], &away, &[&away_player])).await;

    let (status, body) = get_json(&client, &format!("{}/matches/{}", test_app.address, match_id)).await;

    assert_eq!(200, status);
    assert_eq!("Harbour Town", body["data"]["match"]["home_team_name"]);
    assert_eq!("A", body["data"]["match"]["group"]);
    let goal_list = body["data"]["goals"].as_array().unwrap();
    assert_eq!(2, goal_list.len());
    assert_eq!("Ada Striker", goal_list[0]["player_name"]);
    assert_eq!("Valley Rovers", goal_list[1]["team_name"]);

    let (status, _) = get_json(&client, &format!("{}/matches/{}", test_app.address, Uuid::new_v4())).await;
    assert_eq!(404, status);
}

#[tokio::test]
async fn result_form_offers_both_squads() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let (home, home_player, away, away_player) = two_team_setup(&client, &test_app.address).await;
    let match_id = create_match(&client, &test_app.address, &home, &away, None).await;

    let (status, body) = get_json(&client, &format!("{}/admin/matches/{}/result", test_app.address, match_id)).await;

    assert_eq!(200, status);
    assert_eq!(match_id.as_str(), body["data"]["match"]["id"]);
    assert_eq!(home_player.as_str(), body["data"]["home_players"][0]["id"]);
    assert_eq!(away_player.as_str(), body["data"]["away_players"][0]["id"]);
}

#[tokio::test]
async fn admin_dashboard_counts_records() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let (home, _, away, _) = two_team_setup(&client, &test_app.address).await;
    create_match(&client, &test_app.address, &home, &away, None).await;

    let (status, body) = get_json(&client, &format!("{}/admin/dashboard", test_app.address)).await;

    assert_eq!(200, status);
    assert_eq!(2, body["data"]["teams_count"]);
    assert_eq!(2, body["data"]["players_count"]);
    assert_eq!(1, body["data"]["matches_count"]);
}

#[tokio::test]
async fn admin_match_creation_rejects_bad_pairings() {
    let test_app = spawn_app().await;
    let client = Client::new();
    let home = create_team(&client, &test_app.address, "Harbour Town", "A").await;

    let test_cases = vec![
        (json!({ "home_team_id": home, "away_team_id": home }), 400, "team against itself"),
        (json!({ "home_team_id": home, "away_team_id": Uuid::new_v4() }), 404, "unknown away team"),
    ];

    for (body, expected_status, description) in test_cases {
        let response = send_json(
            &client,
            Method::POST,
            &format!("{}/admin/matches", test_app.address),
            Some(body),
        )
        .await;
        assert_eq!(expected_status, response.status().as_u16(), "Case: {}", description);
    }
}
