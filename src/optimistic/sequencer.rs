//! 按键排序
//!
//! 同一个键上的操作严格按入队顺序执行，不同键互不影响。
//! 入队是同步的：点击发生的那一刻就确定了顺序。
//! 每个键只记录最后一个操作的完成句柄，新操作等待它完成后再开始。

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::oneshot;

#[derive(Default)]
struct Tails {
    next_seq: u64,
    /// 键 → (最后一个操作的序号, 它的完成信号)
    by_key: HashMap<String, (u64, oneshot::Receiver<()>)>,
}

/// 按键排序器
#[derive(Clone, Default)]
pub struct KeyedSequencer {
    tails: Arc<Mutex<Tails>>,
}

impl KeyedSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在 `key` 上排队，返回轮次
    pub fn enqueue(&self, key: &str) -> Turn {
        let (done, done_rx) = oneshot::channel();
        let mut tails = self.tails.lock().unwrap_or_else(PoisonError::into_inner);
        tails.next_seq += 1;
        let seq = tails.next_seq;
        let previous = tails
            .by_key
            .insert(key.to_string(), (seq, done_rx))
            .map(|(_, rx)| rx);

        Turn {
            key: key.to_string(),
            seq,
            previous,
            _done: done,
            tails: self.tails.clone(),
        }
    }

    /// 该键上是否还有未完成的操作
    pub fn is_busy(&self, key: &str) -> bool {
        self.tails
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .by_key
            .contains_key(key)
    }
}

/// 一个排队中的操作
///
/// drop 时通知下一个操作开始。
pub struct Turn {
    key: String,
    seq: u64,
    previous: Option<oneshot::Receiver<()>>,
    /// drop 即完成：接收端收到 `RecvError`
    _done: oneshot::Sender<()>,
    tails: Arc<Mutex<Tails>>,
}

impl Turn {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// 等待前一个操作完成
    pub async fn wait(&mut self) {
        if let Some(previous) = self.previous.take() {
            // 前一个操作无论成功、失败还是被丢弃都算完成
            let _ = previous.await;
        }
    }
}

impl Drop for Turn {
    fn drop(&mut self) {
        let mut tails = self.tails.lock().unwrap_or_else(PoisonError::into_inner);
        if matches!(tails.by_key.get(&self.key), Some((seq, _)) if *seq == self.seq) {
            tails.by_key.remove(&self.key);
        }
    }
}
