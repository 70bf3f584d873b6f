use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, unbounded};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use super::api::MediaApi;

/// Runs API calls on the tokio runtime and queues their results for the
/// synchronous state owner, which drains the receiver once per UI tick.
pub struct Dispatcher<M> {
    runtime: Handle,
    api: Arc<dyn MediaApi>,
    tx: Sender<M>,
}

impl<M> Clone for Dispatcher<M> {
    fn clone(&self) -> Self {
        Self {
            runtime: self.runtime.clone(),
            api: Arc::clone(&self.api),
            tx: self.tx.clone(),
        }
    }
}

impl<M: Send + 'static> Dispatcher<M> {
    /// Create a dispatcher together with the receiving end of its queue
    pub fn channel(runtime: Handle, api: Arc<dyn MediaApi>) -> (Self, Receiver<M>) {
        let (tx, rx) = unbounded();
        (Self { runtime, api, tx }, rx)
    }

    /// Queue the result of a single call
    pub fn request<F, Fut, T>(&self, call: F)
    where
        F: FnOnce(Arc<dyn MediaApi>) -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Into<M>,
    {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let message = call(api).await.into();
            // Receiver gone means the session is shutting down
            let _ = tx.send(message);
        });
    }

    /// Queue the result of `call` every `period`, starting immediately.
    ///
    /// The next call is only issued after the previous one finished. Dropping
    /// the returned handle cancels the task.
    pub fn every<F, Fut, T>(&self, period: Duration, call: F) -> TaskHandle
    where
        F: Fn(Arc<dyn MediaApi>) -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Into<M>,
    {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let period = period.max(Duration::from_millis(1));
        let task = self.runtime.spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let pending = call(Arc::clone(&api));
                if tx.send(pending.await.into()).is_err() {
                    break;
                }
            }
        });
        TaskHandle { task }
    }
}

/// Owner of a background task; the task is aborted when this is dropped
#[derive(Debug)]
pub struct TaskHandle {
    task: JoinHandle<()>,
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
