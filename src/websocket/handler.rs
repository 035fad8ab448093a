use crate::{
    models::{BoardLayout, Position},
    websocket::messages::{ClientMessage, ServerMessage},
    AppState,
};
use anyhow::{anyhow, Context};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

/// WebSocket upgrade handler
pub async fn handle_websocket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(100);

    tracing::info!("WebSocket connection established");

    // Spawn a task to send messages to the client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                }
            }
        }
    });

    // Handle incoming messages from the client
    let mut recv_task = tokio::spawn(async move {
        // The round this connection is playing
        let mut current_game: Option<Uuid> = None;

        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => {
                        if let Err(e) =
                            handle_client_message(client_msg, &state, &tx, &mut current_game).await
                        {
                            tracing::error!("Error handling message: {}", e);
                            let error_msg = ServerMessage::Error {
                                message: e.to_string(),
                            };
                            let _ = tx.send(error_msg).await;
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse message: {}", e);
                        let error_msg = ServerMessage::Error {
                            message: format!("Invalid message format: {}", e),
                        };
                        let _ = tx.send(error_msg).await;
                    }
                },
                Message::Close(_) => {
                    tracing::info!("Client disconnected");
                    break;
                }
                _ => {}
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
        }
        _ = (&mut recv_task) => {
            send_task.abort();
        }
    }

    tracing::info!("WebSocket connection closed");
}

/// Handle individual client messages
async fn handle_client_message(
    msg: ClientMessage,
    state: &AppState,
    tx: &mpsc::Sender<ServerMessage>,
    current_game: &mut Option<Uuid>,
) -> anyhow::Result<()> {
    match msg {
        ClientMessage::NewGame { board } => {
            let board = board
                .map(|layout: BoardLayout| {
                    layout
                        .into_board()
                        .filter(|b| b.cell_count() > 0)
                        .ok_or_else(|| anyhow!("Invalid board layout"))
                })
                .transpose()?;
            let game = state.start_game(board);
            *current_game = Some(game.game_id);
            tx.send(ServerMessage::GameState(game.view())).await?;
        }
        ClientMessage::JoinGame { game_id } => {
            let view = state
                .games
                .get(&game_id)
                .map(|game| game.view())
                .with_context(|| format!("Game {} not found", game_id))?;
            tracing::info!("Joined game {}", game_id);
            *current_game = Some(game_id);
            tx.send(ServerMessage::GameState(view)).await?;
        }
        ClientMessage::Select { row, col } => {
            let game_id = current_game.context("No game in progress")?;
            let view = {
                let mut game = state.games.get_mut(&game_id).context("Game has ended")?;
                game.select(Position { row, col })
            };
            tx.send(ServerMessage::SelectionChanged(view)).await?;
        }
        ClientMessage::Reset => {
            let game_id = current_game.context("No game in progress")?;
            let view = {
                let mut game = state.games.get_mut(&game_id).context("Game has ended")?;
                game.reset();
                game.view()
            };
            tx.send(ServerMessage::GameState(view)).await?;
        }
        ClientMessage::Commit => {
            let game_id = current_game.context("No game in progress")?;
            let result = {
                let mut game = state.games.get_mut(&game_id).context("Game has ended")?;
                game.commit(&state.dictionary)
            };
            tx.send(ServerMessage::WordChecked(result)).await?;
        }
        ClientMessage::Solve => {
            let game_id = current_game.context("No game in progress")?;
            let summary = state
                .game_solution(game_id)
                .await
                .context("Game has ended")??;
            tx.send(ServerMessage::Solution(summary)).await?;
        }
    }

    Ok(())
}
