use std::collections::HashMap;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use super::model::StrategyReport;
use super::strategy::{ByteFeed, SniffStrategy};
use crate::error::SniffError;

/// Runs N independent sniffing strategies concurrently against one
/// logical input, each observing an identical, order-preserving copy of
/// the bytes through its own bounded channel.
///
/// The producer (the calling task) reads the source and sends every byte
/// to every live strategy channel. A full channel suspends the producer
/// until its worker drains it, coupling every strategy's throughput to
/// the slowest one; that backpressure is a documented property, not an
/// oversight. A strategy that decides early drops its receiver and its
/// slot is retired without disturbing the rest.
///
/// Worker failures and panics stay inside that worker's report; siblings
/// and the producer never see them. All channels are closed and all
/// workers joined before `run` returns, on every path.
pub struct Fanout {
    capacity: usize,
}

impl Fanout {
    /// `capacity` bounds each strategy's private buffer.
    pub fn new(capacity: usize) -> Result<Self, SniffError> {
        if capacity == 0 {
            return Err(SniffError::InvalidConfig(
                "fan-out channel capacity must be > 0".into(),
            ));
        }
        Ok(Self { capacity })
    }

    /// Run to source exhaustion and collect one report per strategy, in
    /// submission order.
    pub async fn run<R>(
        &self,
        source: R,
        strategies: Vec<Box<dyn SniffStrategy>>,
    ) -> Result<Vec<StrategyReport>, SniffError>
    where
        R: AsyncRead + Unpin,
    {
        self.drive(source, strategies, None).await
    }

    /// Like [`run`](Fanout::run), but stops as soon as `cancel` observes
    /// `true`, whether the producer is still feeding or the workers are
    /// already being joined: every channel is closed so no worker can
    /// block on a half-fed buffer, outstanding workers are aborted, and
    /// their reports carry [`SniffError::Cancelled`].
    pub async fn run_with_cancel<R>(
        &self,
        source: R,
        strategies: Vec<Box<dyn SniffStrategy>>,
        cancel: watch::Receiver<bool>,
    ) -> Result<Vec<StrategyReport>, SniffError>
    where
        R: AsyncRead + Unpin,
    {
        self.drive(source, strategies, Some(cancel)).await
    }

    async fn drive<R>(
        &self,
        mut source: R,
        strategies: Vec<Box<dyn SniffStrategy>>,
        mut cancel: Option<watch::Receiver<bool>>,
    ) -> Result<Vec<StrategyReport>, SniffError>
    where
        R: AsyncRead + Unpin,
    {
        if strategies.is_empty() {
            return Err(SniffError::InvalidConfig(
                "fan-out needs at least one strategy".into(),
            ));
        }

        let count = strategies.len();
        let mut senders: Vec<Option<mpsc::Sender<u8>>> = Vec::with_capacity(count);
        let mut labels: Vec<&'static str> = Vec::with_capacity(count);
        let mut workers = JoinSet::new();
        let mut task_slot: HashMap<tokio::task::Id, usize> = HashMap::with_capacity(count);

        for (index, strategy) in strategies.into_iter().enumerate() {
            let (tx, rx) = mpsc::channel::<u8>(self.capacity);
            labels.push(strategy.label());
            senders.push(Some(tx));
            let handle = workers.spawn(async move { (index, strategy.run(ByteFeed::new(rx)).await) });
            task_slot.insert(handle.id(), index);
        }

        let (mut cancelled, read_error) = match cancel.as_mut() {
            Some(cancel) => {
                tokio::select! {
                    result = replicate(&mut source, &mut senders) => (false, result.err()),
                    _ = wait_for_cancel(cancel) => {
                        warn!("fan-out cancelled before source exhaustion");
                        (true, None)
                    }
                }
            }
            None => (false, replicate(&mut source, &mut senders).await.err()),
        };

        // Close every channel before joining, so no worker can block on
        // a buffer that will never be fed again.
        senders.clear();
        if cancelled {
            workers.abort_all();
        }

        // Cancellation can also arrive while workers are being joined;
        // a worker that keeps running after its channel closes must not
        // wedge the join.
        let mut reports: Vec<Option<StrategyReport>> = (0..count).map(|_| None).collect();
        loop {
            let joined = match cancel.as_mut() {
                Some(cancel) if !cancelled => {
                    tokio::select! {
                        joined = workers.join_next() => joined,
                        _ = wait_for_cancel(cancel) => {
                            warn!("fan-out cancelled while joining workers");
                            cancelled = true;
                            workers.abort_all();
                            continue;
                        }
                    }
                }
                _ => workers.join_next().await,
            };
            let Some(joined) = joined else { break };
            match joined {
                Ok((index, outcome)) => {
                    reports[index] = Some(StrategyReport::new(labels[index], outcome));
                }
                Err(join_error) => {
                    let index = match task_slot.get(&join_error.id()) {
                        Some(&index) => index,
                        None => continue,
                    };
                    let outcome = if join_error.is_cancelled() {
                        Err(SniffError::Cancelled)
                    } else {
                        warn!(strategy = labels[index], "strategy worker panicked");
                        Err(SniffError::WorkerPanic(join_error.to_string()))
                    };
                    reports[index] = Some(StrategyReport::new(labels[index], outcome));
                }
            }
        }

        if let Some(error) = read_error {
            return Err(SniffError::Io(error));
        }

        Ok(reports
            .into_iter()
            .enumerate()
            .map(|(index, report)| {
                report.unwrap_or_else(|| {
                    StrategyReport::new(labels[index], Err(SniffError::Cancelled))
                })
            })
            .collect())
    }
}

/// Read the source and send every byte, in order, to each live strategy
/// channel. Returns once the source is exhausted, the read fails, or no
/// strategy is listening any more.
async fn replicate<R>(
    source: &mut R,
    senders: &mut [Option<mpsc::Sender<u8>>],
) -> Result<(), std::io::Error>
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; 4096];
    loop {
        let read = match source.read(&mut buf).await? {
            0 => return Ok(()),
            n => n,
        };
        for &byte in &buf[..read] {
            let mut any_live = false;
            for slot in senders.iter_mut() {
                let retired = match slot {
                    Some(tx) => tx.send(byte).await.is_err(),
                    None => continue,
                };
                if retired {
                    debug!("strategy finished early; slot retired");
                    *slot = None;
                } else {
                    any_live = true;
                }
            }
            if !any_live {
                debug!("all strategies finished; producer stopping");
                return Ok(());
            }
        }
    }
}

/// Resolves only when cancellation is requested. If the cancel sender is
/// dropped without firing, the fan-out runs to completion.
async fn wait_for_cancel(cancel: &mut watch::Receiver<bool>) {
    if cancel.wait_for(|&flag| flag).await.is_err() {
        std::future::pending::<()>().await;
    }
}
