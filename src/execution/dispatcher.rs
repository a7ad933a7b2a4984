//! Single-slot, cancel-on-supersede execution
//!
//! Each submit aborts whatever was in flight (request and wait ticker
//! together) before spawning the new call. Nothing is queued. Results travel
//! back over a channel drained by [`ExecutionDispatcher::poll`] on the UI
//! thread; every message carries the generation it was sent for, so a result
//! that raced an abort is dropped.

use super::{ExecutionGateway, ExecutionResponse, GatewayError};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Something the UI should react to.
#[derive(Debug)]
pub enum DispatchUpdate {
    /// Still waiting; append a placeholder marker.
    Tick,
    /// The current request finished.
    Finished(Result<ExecutionResponse, GatewayError>),
}

enum Message {
    Tick(u64),
    Finished(u64, Result<ExecutionResponse, GatewayError>),
}

struct InFlight {
    generation: u64,
    request: JoinHandle<()>,
    ticker: JoinHandle<()>,
}

impl InFlight {
    fn abort(self) {
        self.request.abort();
        self.ticker.abort();
    }
}

pub struct ExecutionDispatcher<G> {
    gateway: Arc<G>,
    runtime: Handle,
    tick_interval: Duration,
    generation: u64,
    in_flight: Option<InFlight>,
    sender: UnboundedSender<Message>,
    receiver: UnboundedReceiver<Message>,
}

impl<G: ExecutionGateway> ExecutionDispatcher<G> {
    pub fn new(gateway: G, runtime: Handle, tick_interval: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        ExecutionDispatcher {
            gateway: Arc::new(gateway),
            runtime,
            tick_interval,
            generation: 0,
            in_flight: None,
            sender,
            receiver,
        }
    }

    /// Start executing `source`, cancelling any call still in flight.
    ///
    /// Returns `true` if a previous call was cancelled.
    pub fn submit(&mut self, source: String) -> bool {
        let cancelled = self.cancel();

        self.generation += 1;
        let generation = self.generation;

        let gateway = Arc::clone(&self.gateway);
        let tx = self.sender.clone();
        let request = self.runtime.spawn(async move {
            let result = gateway.execute(source).await;
            let _ = tx.send(Message::Finished(generation, result));
        });

        let tx = self.sender.clone();
        let period = self.tick_interval;
        let ticker = self.runtime.spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick fires immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(Message::Tick(generation)).is_err() {
                    break;
                }
            }
        });

        self.in_flight = Some(InFlight {
            generation,
            request,
            ticker,
        });
        cancelled
    }

    /// Abort the call in flight, if any. Returns whether one was aborted.
    pub fn cancel(&mut self) -> bool {
        match self.in_flight.take() {
            Some(flight) => {
                flight.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Drain pending messages for the current request.
    pub fn poll(&mut self) -> Vec<DispatchUpdate> {
        let mut updates = Vec::new();

        while let Ok(message) = self.receiver.try_recv() {
            match message {
                Message::Tick(generation) if self.is_current(generation) => {
                    updates.push(DispatchUpdate::Tick);
                }
                Message::Finished(generation, result) if self.is_current(generation) => {
                    if let Some(flight) = self.in_flight.take() {
                        flight.ticker.abort();
                    }
                    updates.push(DispatchUpdate::Finished(result));
                }
                _ => {}
            }
        }

        updates
    }

    fn is_current(&self, generation: u64) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|flight| flight.generation == generation)
    }
}

impl<G> Drop for ExecutionDispatcher<G> {
    fn drop(&mut self) {
        if let Some(flight) = self.in_flight.take() {
            flight.abort();
        }
    }
}
