//! Background search workers.
//!
//! A `SearchTask` owns one dispatched search: the worker thread gets its own
//! copy of the position and move list, reports back once over an mpsc
//! channel, and shares nothing with the caller except the stop flag and node
//! counter in `SharedSearchState`.

use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    mpsc::{self, Receiver, TryRecvError},
    Arc,
};
use std::thread;

use log::{debug, warn};

use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::ChessMove;
use crate::search::board_scoring::{PositionTableScorer, Score};
use crate::search::negamax::{negamax_root, SearchConfig};

static NEXT_DISPATCH_ID: AtomicU64 = AtomicU64::new(1);

/// Stop flag and node accounting shared between a caller and its worker.
#[derive(Debug, Default)]
pub struct SharedSearchState {
    stop: AtomicBool,
    pub nodes_visited: AtomicU64,
}

impl SharedSearchState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[inline]
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn add_nodes(&self, n: u64) {
        self.nodes_visited.fetch_add(n, Ordering::Relaxed);
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes_visited.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchReport {
    pub dispatch_id: u64,
    pub best_move: Option<ChessMove>,
    pub score: Score,
    pub nodes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchStatus {
    Running,
    Completed(SearchReport),
    Cancelled,
}

/// Handle to one in-flight search. At most one result is ever accepted, and
/// never after `cancel`.
#[derive(Debug)]
pub struct SearchTask {
    dispatch_id: u64,
    shared: Arc<SharedSearchState>,
    receiver: Option<Receiver<SearchReport>>,
    status: SearchStatus,
}

impl SearchTask {
    /// Starts searching `legal_moves` from a private copy of `game_state`.
    pub fn spawn(game_state: &GameState, legal_moves: &[ChessMove], config: SearchConfig) -> Self {
        let dispatch_id = NEXT_DISPATCH_ID.fetch_add(1, Ordering::Relaxed);
        let shared = SharedSearchState::new();
        let (sender, receiver) = mpsc::channel();

        let mut position = game_state.clone();
        let moves = legal_moves.to_vec();
        let worker_shared = Arc::clone(&shared);

        debug!(
            "dispatch {dispatch_id}: searching {} moves at depth {}",
            moves.len(),
            config.depth
        );

        thread::spawn(move || {
            let outcome = negamax_root(
                &mut position,
                &moves,
                &config,
                &PositionTableScorer,
                &worker_shared,
            );
            if outcome.stopped {
                return;
            }
            // The receiver is gone once the task is cancelled; the result is dropped.
            let _ = sender.send(SearchReport {
                dispatch_id,
                best_move: outcome.best_move,
                score: outcome.score,
                nodes: outcome.nodes,
            });
        });

        Self {
            dispatch_id,
            shared,
            receiver: Some(receiver),
            status: SearchStatus::Running,
        }
    }

    #[inline]
    pub fn dispatch_id(&self) -> u64 {
        self.dispatch_id
    }

    /// Non-blocking check for a result.
    pub fn poll(&mut self) -> SearchStatus {
        if self.status != SearchStatus::Running {
            return self.status;
        }
        let Some(receiver) = &self.receiver else {
            return self.status;
        };

        match receiver.try_recv() {
            Ok(report) => self.finish(report),
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => self.finish_without_result(),
        }
        self.status
    }

    /// Blocks until the worker reports.
    pub fn wait(mut self) -> SearchStatus {
        if self.status != SearchStatus::Running {
            return self.status;
        }
        let received = self.receiver.as_ref().map(|receiver| receiver.recv());
        match received {
            Some(Ok(report)) => self.finish(report),
            Some(Err(_)) => self.finish_without_result(),
            None => {}
        }
        self.status
    }

    /// Stops the worker and discards anything it might still send.
    pub fn cancel(&mut self) {
        if self.status == SearchStatus::Cancelled {
            return;
        }
        self.shared.request_stop();
        self.receiver = None;
        self.status = SearchStatus::Cancelled;
        debug!("dispatch {}: cancelled", self.dispatch_id);
    }

    pub fn nodes(&self) -> u64 {
        self.shared.nodes()
    }

    fn finish(&mut self, report: SearchReport) {
        debug!(
            "dispatch {}: completed after {} nodes",
            self.dispatch_id, report.nodes
        );
        self.receiver = None;
        self.status = SearchStatus::Completed(report);
    }

    fn finish_without_result(&mut self) {
        warn!(
            "dispatch {}: worker exited without a result",
            self.dispatch_id
        );
        self.receiver = None;
        self.status = SearchStatus::Completed(SearchReport {
            dispatch_id: self.dispatch_id,
            best_move: None,
            score: 0.0,
            nodes: self.shared.nodes(),
        });
    }
}

impl Drop for SearchTask {
    fn drop(&mut self) {
        if self.status == SearchStatus::Running {
            self.shared.request_stop();
        }
    }
}
