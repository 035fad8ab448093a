use crate::{
    game::{title_board, Board, Scorer, SolveError},
    models::{BoardLayout, CommitView, GameView, Position, SelectionView, SolveSummary},
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct WordCheckResponse {
    pub word: String,
    pub valid: bool,
    /// Some word starts with this text.
    pub prefix: bool,
}

fn board_from(layout: BoardLayout) -> Result<Board, StatusCode> {
    let (rows, cols, faces) = (layout.rows, layout.cols, layout.faces.len());
    layout.into_board().ok_or_else(|| {
        tracing::warn!("Rejected {}x{} board with {} faces", rows, cols, faces);
        StatusCode::BAD_REQUEST
    })
}

fn solve_status(e: SolveError) -> StatusCode {
    tracing::error!("Failed to solve board: {}", e);
    match e {
        SolveError::TimedOut(_) | SolveError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        SolveError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Start a new round, on a rolled board unless one is supplied
pub async fn create_game(
    State(state): State<Arc<AppState>>,
    payload: Option<Json<BoardLayout>>,
) -> Result<Json<GameView>, StatusCode> {
    let board = match payload {
        Some(Json(layout)) => {
            let board = board_from(layout)?;
            if board.cell_count() == 0 {
                return Err(StatusCode::BAD_REQUEST);
            }
            Some(board)
        }
        None => None,
    };

    let game = state.start_game(board);
    Ok(Json(game.view()))
}

pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameView>, StatusCode> {
    let game = state.games.get(&game_id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(game.view()))
}

pub async fn select_cell(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<Uuid>,
    Json(pos): Json<Position>,
) -> Result<Json<SelectionView>, StatusCode> {
    let mut game = state.games.get_mut(&game_id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(game.select(pos)))
}

pub async fn reset_selection(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameView>, StatusCode> {
    let mut game = state.games.get_mut(&game_id).ok_or(StatusCode::NOT_FOUND)?;
    game.reset();
    Ok(Json(game.view()))
}

pub async fn commit_word(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<CommitView>, StatusCode> {
    let mut game = state.games.get_mut(&game_id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(game.commit(&state.dictionary)))
}

/// Every word on the game's board, computed once per game
pub async fn get_solution(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<SolveSummary>, StatusCode> {
    let summary = state
        .game_solution(game_id)
        .await
        .ok_or(StatusCode::NOT_FOUND)?
        .map_err(solve_status)?;
    Ok(Json(summary))
}

pub async fn get_title_board() -> Json<Board> {
    Json(title_board())
}

/// Solve an arbitrary board without starting a game
pub async fn solve_board(
    State(state): State<Arc<AppState>>,
    Json(layout): Json<BoardLayout>,
) -> Result<Json<SolveSummary>, StatusCode> {
    let board = board_from(layout)?;
    let summary = state.solve(board).await.map_err(solve_status)?;
    Ok(Json(summary))
}

/// Check a single word against the commit rules
pub async fn check_word(
    State(state): State<Arc<AppState>>,
    Path(word): Path<String>,
) -> Json<WordCheckResponse> {
    let word = word.to_lowercase();
    let valid = Scorer::is_acceptable(&state.dictionary, &word);
    let prefix = state.dictionary.has_prefix(&word);
    Json(WordCheckResponse {
        word,
        valid,
        prefix,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{Config, GameConfig, ServerConfig},
        dictionary::Dictionary,
        models::WordOutcome,
        routes::create_router,
        tests::test_state,
    };
    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request},
        Router,
    };
    use serde::de::DeserializeOwned;
    use serde_json::json;
    use tower::ServiceExt;

    fn app() -> (Arc<AppState>, Router) {
        let state = Arc::new(test_state(120));
        (state.clone(), create_router(state))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                request = request.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json<T: DeserializeOwned>(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> T {
        let (status, bytes) = send(app, method, uri, body).await;
        assert_eq!(status, StatusCode::OK, "{}", String::from_utf8_lossy(&bytes));
        serde_json::from_slice(&bytes).unwrap()
    }

    fn cats_board() -> serde_json::Value {
        json!({ "rows": 2, "cols": 2, "faces": ["C", "A", "T", "S"] })
    }

    #[tokio::test]
    async fn test_health() {
        let (_, app) = app();
        let body: serde_json::Value = send_json(&app, Method::GET, "/health", None).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "ramble-backend");
    }

    #[tokio::test]
    async fn test_title_board() {
        let (_, app) = app();
        let board: Board = send_json(&app, Method::GET, "/api/boards/title", None).await;
        assert_eq!(board, title_board());
        assert_eq!(board.face(1, 1), Some("A"));
    }

    #[tokio::test]
    async fn test_create_rolled_game() {
        let (state, app) = app();
        let view: GameView = send_json(&app, Method::POST, "/api/games", None).await;

        assert_eq!((view.rows, view.cols), (4, 4));
        assert!(view.active);
        assert!(view.found_words.is_empty());
        assert!(state.games.contains_key(&view.game_id));
    }

    #[tokio::test]
    async fn test_play_a_word() {
        let (_, app) = app();
        let view: GameView = send_json(&app, Method::POST, "/api/games", Some(cats_board())).await;
        let base = format!("/api/games/{}", view.game_id);

        for (row, col) in [(0, 0), (0, 1), (1, 0)] {
            let sel: SelectionView = send_json(
                &app,
                Method::POST,
                &format!("{base}/select"),
                Some(json!({ "row": row, "col": col })),
            )
            .await;
            assert!(sel.selection.changed());
        }

        let commit: CommitView = send_json(&app, Method::POST, &format!("{base}/commit"), None).await;
        assert_eq!(commit.word, "cat");
        assert_eq!(commit.outcome, WordOutcome::New);
        assert_eq!(commit.score, 1);

        let view: GameView = send_json(&app, Method::GET, &base, None).await;
        assert_eq!(view.found_words, vec!["cat"]);
        assert_eq!(view.current_word, "");
    }

    #[tokio::test]
    async fn test_reset_selection() {
        let (_, app) = app();
        let view: GameView = send_json(&app, Method::POST, "/api/games", Some(cats_board())).await;
        let base = format!("/api/games/{}", view.game_id);

        let _: SelectionView = send_json(
            &app,
            Method::POST,
            &format!("{base}/select"),
            Some(json!({ "row": 1, "col": 1 })),
        )
        .await;
        let view: GameView = send_json(&app, Method::POST, &format!("{base}/reset"), None).await;
        assert!(view.path.is_empty());
    }

    #[tokio::test]
    async fn test_solution() {
        let (_, app) = app();
        let view: GameView = send_json(&app, Method::POST, "/api/games", Some(cats_board())).await;

        let summary: SolveSummary = send_json(
            &app,
            Method::GET,
            &format!("/api/games/{}/solution", view.game_id),
            None,
        )
        .await;
        assert_eq!(summary.words, vec!["cat", "cats"]);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.max_score, 3);
    }

    #[tokio::test]
    async fn test_solve_board() {
        let (_, app) = app();
        let summary: SolveSummary = send_json(&app, Method::POST, "/api/solve", Some(cats_board())).await;
        assert_eq!(summary.words, vec!["cat", "cats"]);

        let empty: SolveSummary = send_json(
            &app,
            Method::POST,
            "/api/solve",
            Some(json!({ "rows": 1, "cols": 1, "faces": ["A"] })),
        )
        .await;
        assert_eq!(empty.count, 0);
    }

    #[tokio::test]
    async fn test_solve_partial_board() {
        let (_, app) = app();
        let summary: SolveSummary = send_json(
            &app,
            Method::POST,
            "/api/solve",
            Some(json!({ "rows": 10, "cols": 10, "faces": [] })),
        )
        .await;
        assert_eq!(summary.count, 0);

        let summary: SolveSummary = send_json(
            &app,
            Method::POST,
            "/api/solve",
            Some(json!({ "rows": 3, "cols": 3, "faces": ["C", "A", "", "T", "S"] })),
        )
        .await;
        assert_eq!(summary.words, vec!["cat", "cats"]);
    }

    #[tokio::test]
    async fn test_solve_timeout_is_unavailable() {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            game: GameConfig {
                solve_timeout_ms: 50,
                ..GameConfig::default()
            },
        };
        // Runs of `a` never stop matching on an all-`A` board.
        let dict = Dictionary::from_words((1..=100).map(|n| "a".repeat(n)));
        let app = create_router(Arc::new(AppState::new(config, dict)));

        let faces = vec!["A"; 100];
        let board = json!({ "rows": 10, "cols": 10, "faces": faces });
        let (status, _) = send(&app, Method::POST, "/api/solve", Some(board)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_rejects_bad_boards() {
        let (_, app) = app();
        let too_many_faces = json!({ "rows": 1, "cols": 1, "faces": ["A", "B"] });
        let (status, _) = send(&app, Method::POST, "/api/solve", Some(too_many_faces)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let too_big = json!({ "rows": 11, "cols": 10, "faces": [] });
        let (status, _) = send(&app, Method::POST, "/api/solve", Some(too_big)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let no_cells = json!({ "rows": 0, "cols": 4, "faces": [] });
        let (status, _) = send(&app, Method::POST, "/api/games", Some(no_cells)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_game() {
        let (_, app) = app();
        let uri = format!("/api/games/{}", Uuid::new_v4());
        let (status, _) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::POST, &format!("{uri}/commit"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_check_word() {
        let (_, app) = app();
        let check: WordCheckResponse = send_json(&app, Method::GET, "/api/words/CATS", None).await;
        assert_eq!(check.word, "cats");
        assert!(check.valid);

        let check: WordCheckResponse = send_json(&app, Method::GET, "/api/words/at", None).await;
        assert!(!check.valid);
        assert!(check.prefix);

        let check: WordCheckResponse = send_json(&app, Method::GET, "/api/words/ca", None).await;
        assert!(!check.valid);
        assert!(check.prefix);

        let check: WordCheckResponse = send_json(&app, Method::GET, "/api/words/dog", None).await;
        assert!(!check.valid);
        assert!(!check.prefix);
    }
}
