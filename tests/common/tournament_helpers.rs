use reqwest::{Client, Method, Response};
use serde_json::{json, Value};

pub async fn send_json(
    client: &Client,
    method: Method,
    url: &str,
    body: Option<Value>,
) -> Response {
    let mut request = client.request(method, url);
    if let Some(body) = body {
        request = request.json(&body);
    }
    request.send().await.expect("Failed to execute request.")
}

pub async fn get_json(client: &Client, url: &str) -> (u16, Value) {
    let response = send_json(client, Method::GET, url, None).await;
    let status = response.status().as_u16();
    let body = response.json().await.expect("Failed to parse response");
    (status, body)
}

/// Create a team and return its id
pub async fn create_team(client: &Client, app_address: &str, name: &str, group: &str) -> String {
    let response = send_json(
        client,
        Method::POST,
        &format!("{}/admin/teams", app_address),
        Some(json!({ "name": name, "group": group })),
    )
    .await;
    assert_eq!(201, response.status().as_u16(), "Failed to create team {}", name);

    let body: Value = response.json().await.expect("Failed to parse team response");
    body["data"]["id"].as_str().expect("No team id").to_string()
}

/// Create a player and return its id
pub async fn create_player(client: &Client, app_address: &str, name: &str, team_id: &str) -> String {
    let response = send_json(
        client,
        Method::POST,
        &format!("{}/admin/players", app_address),
        Some(json!({ "name": name, "team_id": team_id })),
    )
    .await;
    assert_eq!(201, response.status().as_u16(), "Failed to create player {}", name);

    let body: Value = response.json().await.expect("Failed to parse player response");
    body["data"]["id"].as_str().expect("No player id").to_string()
}

/// Schedule a match and return its id
pub async fn create_match(
    client: &Client,
    app_address: &str,
    home_team_id: &str,
    away_team_id: &str,
    stage: Option<&str>,
) -> String {
    let mut request = json!({
        "home_team_id": home_team_id,
        "away_team_id": away_team_id
    });
    if let Some(stage) = stage {
        request["stage"] = json!(stage);
    }

    let response = send_json(
        client,
        Method::POST,
        &format!("{}/admin/matches", app_address),
        Some(request),
    )
    .await;
    assert_eq!(201, response.status().as_u16(), "Failed to create match");

    let body: Value = response.json().await.expect("Failed to parse match response");
    body["data"]["id"].as_str().expect("No match id").to_string()
}

/// Goal list crediting each scorer once per entry
pub fn goals(home_team_id: &str, home_scorers: &[&str], away_team_id: &str, away_scorers: &[&str]) -> Value {
    let mut goals: Vec<Value> = home_scorers
        .iter()
        .map(|player_id| json!({ "player_id": player_id, "team_id": home_team_id }))
        .collect();
    goals.extend(
        away_scorers
            .iter()
            .map(|player_id| json!({ "player_id": player_id, "team_id": away_team_id })),
    );
    Value::Array(goals)
}

pub async fn record_result(
    client: &Client,
    app_address: &str,
    match_id: &str,
    home_score: i32,
    away_score: i32,
    goals: Value,
) -> Response {
    send_json(
        client,
        Method::PUT,
        &format!("{}/admin/matches/{}/result", app_address, match_id),
        Some(json!({
            "home_score": home_score,
            "away_score": away_score,
            "goals": goals
        })),
    )
    .await
}

/// Fetch a team's record through the admin API
pub async fn team_record(client: &Client, app_address: &str, team_id: &str) -> Value {
    let (status, body) = get_json(client, &format!("{}/admin/teams/{}", app_address, team_id)).await;
    assert_eq!(200, status);
    body["data"].clone()
}

pub fn assert_record(team: &Value, played: i64, won: i64, drawn: i64, lost: i64, goals_for: i64, goals_against: i64, points: i64) {
    assert_eq!(team["played"], played, "played for {}", team["name"]);
    assert_eq!(team["won"], won, "won for {}", team["name"]);
    assert_eq!(team["drawn"], drawn, "drawn for {}", team["name"]);
    assert_eq!(team["lost"], lost, "lost for {}", team["name"]);
    assert_eq!(team["goals_for"], goals_for, "goals_for for {}", team["name"]);
    assert_eq!(team["goals_against"], goals_against, "goals_against for {}", team["name"]);
    assert_eq!(team["points"], points, "points for {}", team["name"]);
}

/// Two teams in group A with one player each: (home_team, home_player, away_team, away_player)
pub async fn two_team_setup(client: &Client, app_address: &str) -> (String, String, String, String) {
    let home = create_team(client, app_address, "Harbour Town", "A").await;
    let away = create_team(client, app_address, "Valley Rovers", "A").await;
    let home_player = create_player(client, app_address, "Ada Striker", &home).await;
    let away_player = create_player(client, app_address, "Ben Winger", &away).await;
    (home, home_player, away, away_player)
}
