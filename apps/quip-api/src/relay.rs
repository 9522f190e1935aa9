//! Stateless chat relay: clients join with a username, then every message and
//! typing notice fans out to the other connected clients. Nothing is stored;
//! the only shared state is the session registry, whose entries live exactly
//! as long as their sockets.
//!
//! Client -> server (JSON):
//! ```json
//! {"type": "join", "username": "ada"}
//! {"type": "message", "username": "ada", "text": "hi all"}
//! {"type": "typing", "username": "ada"}
//! ```
//!
//! Server -> clients (JSON): `user_joined`, `new_message`, `user_typing`,
//! `user_left`.

use std::{
	collections::HashMap,
	sync::{Arc, Mutex},
};

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use uuid::Uuid;

const RELAY_CAPACITY: usize = 64;

#[derive(Debug, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientEvent {
	Join { username: String },
	Message { username: String, text: String },
	Typing { username: String },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
	UserJoined { username: String },
	NewMessage { username: String, text: String },
	UserTyping { username: String },
	UserLeft { username: String },
}

#[derive(Clone, Debug)]
struct Outbound {
	origin: Uuid,
	// Messages go to everyone including the sender; presence events skip the
	// originating session.
	everyone: bool,
	event: ServerEvent,
}

pub struct Relay {
	tx: broadcast::Sender<Outbound>,
	sessions: Mutex<HashMap<Uuid, String>>,
}

impl Relay {
	pub fn new() -> Self {
		let (tx, _) = broadcast::channel(RELAY_CAPACITY);

		Self { tx, sessions: Mutex::new(HashMap::new()) }
	}

	pub fn session_count(&self) -> usize {
		self.sessions.lock().unwrap_or_else(|err| err.into_inner()).len()
	}

	fn join(&self, session: Uuid, username: String) {
		self.sessions.lock().unwrap_or_else(|err| err.into_inner()).insert(session, username);
	}

	fn leave(&self, session: Uuid) -> Option<String> {
		self.sessions.lock().unwrap_or_else(|err| err.into_inner()).remove(&session)
	}

	fn dispatch(&self, session: Uuid, event: ClientEvent) {
		match event {
			ClientEvent::Join { username } => {
				self.join(session, username.clone());
				self.publish(session, false, ServerEvent::UserJoined { username });
			},
			ClientEvent::Message { username, text } => {
				self.publish(session, true, ServerEvent::NewMessage { username, text });
			},
			ClientEvent::Typing { username } => {
				self.publish(session, false, ServerEvent::UserTyping { username });
			},
		}
	}

	fn publish(&self, origin: Uuid, everyone: bool, event: ServerEvent) {
		// Send only fails when nobody is subscribed, which is fine to drop.
		let _ = self.tx.send(Outbound { origin, everyone, event });
	}
}

pub async fn handle_socket(socket: WebSocket, relay: Arc<Relay>) {
	let session = Uuid::new_v4();
	let (mut sender, mut receiver) = socket.split();
	let mut rx = relay.tx.subscribe();
	let forward = tokio::spawn(async move {
		while let Ok(outbound) = rx.recv().await {
			if !outbound.everyone && outbound.origin == session {
				continue;
			}

			let Ok(payload) = serde_json::to_string(&outbound.event) else {
				continue;
			};

			if sender.send(Message::Text(payload.into())).await.is_err() {
				break;
			}
		}
	});

	while let Some(Ok(message)) = receiver.next().await {
		match message {
			Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
				Ok(event) => relay.dispatch(session, event),
				Err(err) => {
					tracing::warn!(error = %err, "Ignoring malformed relay event.");
				},
			},
			Message::Close(_) => break,
			_ => {},
		}
	}

	// The registry entry lives exactly as long as the socket.
	if let Some(username) = relay.leave(session) {
		relay.publish(session, false, ServerEvent::UserLeft { username });
	}

	forward.abort();
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn join_and_leave_drive_the_session_registry() {
		let relay = Relay::new();
		let session = Uuid::new_v4();

		relay.dispatch(session, ClientEvent::Join { username: "ada".to_string() });
		assert_eq!(relay.session_count(), 1);

		assert_eq!(relay.leave(session), Some("ada".to_string()));
		assert_eq!(relay.session_count(), 0);
		assert_eq!(relay.leave(session), None);
	}

	#[tokio::test]
	async fn messages_reach_every_subscriber() {
		let relay = Relay::new();
		let mut rx = relay.tx.subscribe();
		let session = Uuid::new_v4();

		relay.dispatch(session, ClientEvent::Message {
			username: "ada".to_string(),
			text: "hi all".to_string(),
		});

		let outbound = rx.recv().await.expect("Expected a broadcast event.");

		assert!(outbound.everyone);
		assert_eq!(outbound.event, ServerEvent::NewMessage {
			username: "ada".to_string(),
			text: "hi all".to_string(),
		});
	}

	#[tokio::test]
	async fn presence_events_skip_the_origin_session() {
		let relay = Relay::new();
		let mut rx = relay.tx.subscribe();
		let session = Uuid::new_v4();

		relay.dispatch(session, ClientEvent::Typing { username: "ada".to_string() });

		let outbound = rx.recv().await.expect("Expected a broadcast event.");

		assert!(!outbound.everyone);
		assert_eq!(outbound.origin, session);
	}

	#[test]
	fn client_events_parse_from_tagged_json() {
		let event: ClientEvent =
			serde_json::from_str("{\"type\": \"join\", \"username\": \"ada\"}")
				.expect("Failed to parse.");

		assert!(matches!(event, ClientEvent::Join { username } if username == "ada"));
	}

	#[test]
	fn server_events_serialize_with_wire_tags() {
		let json = serde_json::to_value(ServerEvent::UserLeft { username: "ada".to_string() })
			.expect("Failed to serialize.");

		assert_eq!(json["type"], "user_left");
		assert_eq!(json["username"], "ada");
	}
}
