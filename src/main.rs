mod config;
mod dictionary;
mod game;
mod models;
mod routes;
mod websocket;

use std::{sync::Arc, time::Duration};

use anyhow::Result;
use chrono::{TimeDelta, Utc};
use config::Config;
use dashmap::DashMap;
use dictionary::Dictionary;
use game::{solver::solve_with_timeout, Board, BoardGenerator, GameSession, Scorer, SolveError};
use models::SolveSummary;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// How long a finished round stays queryable before cleanup (seconds)
pub const FINISHED_GAME_GRACE_SECS: i64 = 300;
/// How often the cleanup task scans for finished rounds
pub const CLEANUP_INTERVAL: Duration = Duration::from_secs(15);

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub dictionary: Arc<Dictionary>,
    pub generator: BoardGenerator,
    /// Live rounds keyed by game id
    pub games: DashMap<Uuid, GameSession>,
}

impl AppState {
    pub fn new(config: Config, dictionary: Dictionary) -> Self {
        let generator = BoardGenerator::new(
            config.game.board_rows,
            config.game.board_cols,
            config.game.min_vowels,
        );
        Self {
            config,
            dictionary: Arc::new(dictionary),
            generator,
            games: DashMap::new(),
        }
    }

    /// Start a round on `board`, or on a freshly rolled board.
    pub fn start_game(&self, board: Option<Board>) -> GameSession {
        let board = board.unwrap_or_else(|| self.generator.generate());
        let session = GameSession::new(board, self.config.game.round_seconds);
        tracing::info!(
            "Started game {} on a {}x{} board",
            session.game_id,
            session.board().num_rows(),
            session.board().num_cols()
        );
        self.games.insert(session.game_id, session.clone());
        session
    }

    /// Solve `board` on the blocking pool under the configured time limit.
    pub async fn solve(&self, board: Board) -> Result<SolveSummary, SolveError> {
        let words = solve_with_timeout(
            self.dictionary.clone(),
            board,
            self.config.game.parallel_solve,
            self.config.game.solve_timeout(),
        )
        .await?;
        Ok(Scorer::summarize(&words))
    }

    /// Solution for a game, computed on first request and cached on the
    /// session. `None` if the game does not exist.
    pub async fn game_solution(
        &self,
        game_id: Uuid,
    ) -> Option<Result<SolveSummary, SolveError>> {
        let board = {
            let game = self.games.get(&game_id)?;
            if let Some(solution) = game.solution() {
                return Some(Ok(solution.clone()));
            }
            game.board().clone()
        };

        let result = self.solve(board).await;
        if let Ok(summary) = &result {
            if let Some(mut game) = self.games.get_mut(&game_id) {
                game.set_solution(summary.clone());
            }
        }
        Some(result)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ramble_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Ramble backend server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Load dictionary; an unreadable word list leaves the server running
    // with every word rejected
    let dictionary = Dictionary::load_or_empty(&config.game.dictionary_path).await;
    if dictionary.is_empty() {
        tracing::warn!(
            "Download a word list to {} for full functionality",
            config.game.dictionary_path
        );
    } else {
        let words = game::solver::solve(&game::title_board(), &dictionary);
        tracing::info!("Title board holds {} words", words.len());
    }

    let state = Arc::new(AppState::new(config.clone(), dictionary));

    // Spawn background task to drop rounds that ended a while ago
    let cleanup_state = state.clone();
    tokio::spawn(async move {
        game_cleanup_task(cleanup_state).await;
    });

    let app = routes::create_router(state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("WebSocket endpoint: ws://{}/ws", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Background task that periodically removes finished rounds
async fn game_cleanup_task(state: Arc<AppState>) {
    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        interval.tick().await;
        let removed = remove_finished_games(&state);
        if removed > 0 {
            tracing::info!("Removed {} finished game(s)", removed);
        }
    }
}

/// Drop every round that ended more than the grace period ago.
fn remove_finished_games(state: &AppState) -> usize {
    let cutoff = Utc::now() - TimeDelta::seconds(FINISHED_GAME_GRACE_SECS);
    let before = state.games.len();
    state.games.retain(|_, game| game.ends_at() > cutoff);
    before - state.games.len()
}
