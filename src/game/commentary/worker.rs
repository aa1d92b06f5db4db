use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use super::backend::{ContentBackend, ContentError};
use super::client::{Commentary, CommentaryClient, CommentaryConfig};
use super::CommentaryRequest;

pub enum CommentaryCommand {
    Request(CommentaryRequest),
    Shutdown,
}

/// What the host UI receives back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentEvent {
    Commentary(Commentary),
    /// Human-readable failure notice; never affects the simulation.
    Notice(String),
}

pub struct CommentaryWorker {
    tx_cmd: Sender<CommentaryCommand>,
    rx_evt: Receiver<ContentEvent>,
    thread: Option<JoinHandle<()>>,
}

impl CommentaryWorker {
    pub fn spawn<B>(backend: B, config: CommentaryConfig) -> Result<Self, ContentError>
    where
        B: ContentBackend + 'static,
    {
        let (tx_cmd, rx_cmd) = mpsc::channel::<CommentaryCommand>();
        let (tx_evt, rx_evt) = mpsc::channel::<ContentEvent>();

        let client = CommentaryClient::new(backend, config);
        let thread = thread::Builder::new()
            .name("commentary-worker".to_string())
            .spawn(move || worker_loop(client, rx_cmd, tx_evt))
            .map_err(|err| ContentError::Spawn(err.to_string()))?;

        Ok(Self {
            tx_cmd,
            rx_evt,
            thread: Some(thread),
        })
    }

    /// Queue a request without waiting. False once the worker is gone.
    pub fn submit(&self, request: CommentaryRequest) -> bool {
        self.tx_cmd.send(CommentaryCommand::Request(request)).is_ok()
    }

    pub fn try_recv(&self) -> Option<ContentEvent> {
        self.rx_evt.try_recv().ok()
    }

    /// Drain everything that has arrived so far.
    pub fn drain(&self) -> Vec<ContentEvent> {
        self.rx_evt.try_iter().collect()
    }

    /// Stop the worker and wait for it, returning anything it still produced.
    pub fn shutdown(mut self) -> Vec<ContentEvent> {
        self.stop();
        self.rx_evt.try_iter().collect()
    }

    fn stop(&mut self) {
        let _ = self.tx_cmd.send(CommentaryCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for CommentaryWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn worker_loop<B: ContentBackend>(
    mut client: CommentaryClient<B>,
    rx_cmd: Receiver<CommentaryCommand>,
    tx_evt: Sender<ContentEvent>,
) {
    while let Ok(cmd) = rx_cmd.recv() {
        match cmd {
            CommentaryCommand::Request(request) => {
                let event = match client.generate(&request) {
                    Ok(commentary) => ContentEvent::Commentary(commentary),
                    Err(err) => {
                        log::warn!("[Commentary] frame {}: {err}", request.frame);
                        ContentEvent::Notice(format!("Commentary unavailable: {err}"))
                    }
                };
                if tx_evt.send(event).is_err() {
                    break;
                }
            }
            CommentaryCommand::Shutdown => break,
        }
    }
}
