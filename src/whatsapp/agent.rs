//! WhatsApp Agent
//!
//! Agent struct and startup logic: opens the session store, builds the bot
//! and feeds every chat message through the dispatcher.

use super::{WhatsAppClient, convert};
use crate::connection::{LinkStatus, report_connection};
use crate::dispatch::Dispatcher;
use crate::event::{ConnectionUpdate, DisconnectReason};
use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Notify;

use wacore::types::events::Event;
use whatsapp_rust::bot::Bot;
use whatsapp_rust_sqlite_storage::SqliteStore;
use whatsapp_rust_tokio_transport::TokioWebSocketTransportFactory;
use whatsapp_rust_ureq_http_client::UreqHttpClient;

/// WhatsApp agent that routes inbound messages to the dispatcher
pub struct WhatsAppAgent {
    dispatcher: Arc<Dispatcher>,
    session_db: PathBuf,
}

impl WhatsAppAgent {
    pub fn new(dispatcher: Arc<Dispatcher>, session_db: PathBuf) -> Self {
        Self {
            dispatcher,
            session_db,
        }
    }

    /// Start as a background task. Returns JoinHandle.
    /// The task fails on a startup error, a bot error or a logout.
    pub fn start(self) -> tokio::task::JoinHandle<Result<()>> {
        tokio::spawn(async move {
            if let Some(parent) = self.session_db.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create session dir {}", parent.display()))?;
            }

            let backend = Arc::new(
                SqliteStore::new(self.session_db.to_string_lossy().as_ref())
                    .await
                    .context("Failed to open WhatsApp session store")?,
            );

            tracing::info!("WhatsApp agent starting (session: {})", self.session_db.display());

            let dispatcher = self.dispatcher.clone();
            let logged_out = Arc::new(Notify::new());
            let logged_out_signal = logged_out.clone();

            let bot_result = Bot::builder()
                .with_backend(backend)
                .with_transport_factory(TokioWebSocketTransportFactory::new())
                .with_http_client(UreqHttpClient::new())
                .on_event(move |event, client| {
                    let dispatcher = dispatcher.clone();
                    let logged_out = logged_out_signal.clone();
                    async move {
                        let update = match event {
                            Event::PairingQrCode { .. } => {
                                tracing::info!(
                                    "WhatsApp: device not paired, link it from WhatsApp → Linked Devices"
                                );
                                return;
                            }
                            Event::PairSuccess(_) => {
                                tracing::info!("WhatsApp: pairing successful");
                                return;
                            }
                            Event::Message(msg, info) => {
                                let inbound = convert::inbound_event(&msg, &info);
                                let client = WhatsAppClient::new(client);
                                dispatcher.on_messages_upsert(&client, &[inbound]).await;
                                return;
                            }
                            Event::Connected(_) => ConnectionUpdate::Open {
                                user: client.get_pn().await.map(|jid| jid.to_string()),
                            },
                            Event::Disconnected(_) => ConnectionUpdate::Close {
                                reason: DisconnectReason::Transient(None),
                            },
                            Event::LoggedOut(_) => ConnectionUpdate::Close {
                                reason: DisconnectReason::LoggedOut,
                            },
                            _ => return,
                        };

                        if report_connection(&update) == LinkStatus::LoggedOut {
                            logged_out.notify_one();
                        }
                    }
                })
                .build()
                .await;

            let mut bot = bot_result.context("Failed to build WhatsApp bot")?;

            report_connection(&ConnectionUpdate::Connecting);
            let handle = bot.run().await.context("Failed to run WhatsApp bot")?;

            supervise(handle, &logged_out).await
        })
    }
}

/// Wait for the bot task to finish. A logout aborts it and is reported as an error.
async fn supervise(mut handle: tokio::task::JoinHandle<()>, logged_out: &Notify) -> Result<()> {
    tokio::select! {
        res = &mut handle => {
            res.context("WhatsApp bot task failed")?;
            Ok(())
        }
        _ = logged_out.notified() => {
            handle.abort();
            bail!("WhatsApp session logged out");
        }
    }
}
