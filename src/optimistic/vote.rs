//! 乐观投票
//!
//! 点击时同步更新本地票数并返回，网络请求在后台任务里按条目顺序发出。
//! 成功则确认，失败则回滚到点击前的状态并通知 UI。
//!
//! 回滚点按条目维护：某次投票失败时如果同一条目后面还有未完成的投票，
//! 显示状态保持为用户最新的意图，由下一次投票继承这次的回滚点。

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::sequencer::KeyedSequencer;
use crate::api::IncidentApi;
use crate::error::{ClientError, Result};
use crate::events::{ClientEvent, EventBus};
use crate::models::{VoteDirection, VoteReceipt, VoteTarget};

/// 某个条目的投票显示状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteState {
    pub target: VoteTarget,
    pub direction: VoteDirection,
    pub displayed_tally: i64,
}

impl VoteState {
    pub fn new(target: VoteTarget, direction: VoteDirection, displayed_tally: i64) -> Self {
        Self {
            target,
            direction,
            displayed_tally,
        }
    }

    /// 应用一次点击
    ///
    /// 点击与当前方向相同则取消，否则切换到点击的方向；
    /// 票数按新旧方向的权重差调整。
    pub fn apply(&self, click: VoteDirection) -> VoteState {
        let next = if click == self.direction {
            VoteDirection::None
        } else {
            click
        };

        VoteState {
            target: self.target.clone(),
            direction: next,
            displayed_tally: self.displayed_tally + next.weight() - self.direction.weight(),
        }
    }
}

struct PendingMutation {
    seq: u64,
    /// 失败时回滚到的状态
    rollback_to: VoteState,
}

struct ItemVotes {
    state: VoteState,
    /// 最近一次服务端确认的状态
    confirmed: VoteState,
    pending: VecDeque<PendingMutation>,
}

impl ItemVotes {
    fn new(state: VoteState) -> Self {
        Self {
            confirmed: state.clone(),
            state,
            pending: VecDeque::new(),
        }
    }
}

struct Inner {
    api: Arc<dyn IncidentApi>,
    events: EventBus,
    items: Mutex<HashMap<VoteTarget, ItemVotes>>,
    sequencer: KeyedSequencer,
}

impl Inner {
    fn items(&self) -> MutexGuard<'_, HashMap<VoteTarget, ItemVotes>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn confirm(&self, target: &VoteTarget, seq: u64, receipt: VoteReceipt) -> VoteState {
        let mut items = self.items();
        let item = items
            .entry(target.clone())
            .or_insert_with(|| ItemVotes::new(VoteState::new(target.clone(), receipt.direction, 0)));

        item.pending.retain(|m| m.seq != seq);
        // 后续投票的回滚点就是这次投票留下的状态
        let left_behind = item
            .pending
            .front()
            .map(|next| next.rollback_to.displayed_tally)
            .unwrap_or(item.state.displayed_tally);
        let mut confirmed = VoteState {
            target: target.clone(),
            direction: receipt.direction,
            displayed_tally: left_behind,
        };

        // 没有后续投票时以服务端票数为准
        if item.pending.is_empty() {
            if let (Some(up), Some(down)) = (receipt.upvotes, receipt.downvotes) {
                confirmed.displayed_tally = up - down;
                item.state = confirmed.clone();
            }
        }
        item.confirmed = confirmed;
        item.state.clone()
    }

    fn roll_back(&self, target: &VoteTarget, seq: u64) -> VoteState {
        let mut items = self.items();
        let Some(item) = items.get_mut(target) else {
            return VoteState::new(target.clone(), VoteDirection::None, 0);
        };

        if let Some(index) = item.pending.iter().position(|m| m.seq == seq) {
            if let Some(failed) = item.pending.remove(index) {
                match item.pending.get_mut(index) {
                    Some(next) => next.rollback_to = failed.rollback_to,
                    None => item.state = failed.rollback_to,
                }
            }
        }
        item.state.clone()
    }
}

/// 投票控制器
#[derive(Clone)]
pub struct VoteController {
    inner: Arc<Inner>,
}

impl VoteController {
    pub fn new(api: Arc<dyn IncidentApi>, events: EventBus) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                events,
                items: Mutex::new(HashMap::new()),
                sequencer: KeyedSequencer::new(),
            }),
        }
    }

    /// 登记条目的服务端状态（渲染帖子或评论时调用）
    ///
    /// 条目有未完成的投票时保留本地状态，只更新确认状态。
    pub fn track(&self, target: VoteTarget, direction: VoteDirection, tally: i64) -> VoteState {
        let state = VoteState::new(target.clone(), direction, tally);
        let mut items = self.inner.items();
        match items.get_mut(&target) {
            Some(item) if !item.pending.is_empty() => {
                item.confirmed = state;
                item.state.clone()
            }
            _ => {
                items.insert(target, ItemVotes::new(state.clone()));
                state
            }
        }
    }

    /// 首次看到条目时登记（方向未知，视为未投票），已登记的条目保持不变
    pub fn observe(&self, target: VoteTarget, tally: i64) -> VoteState {
        let mut items = self.inner.items();
        items
            .entry(target.clone())
            .or_insert_with(|| ItemVotes::new(VoteState::new(target, VoteDirection::None, tally)))
            .state
            .clone()
    }

    /// 当前显示状态
    pub fn state(&self, target: &VoteTarget) -> Option<VoteState> {
        self.inner.items().get(target).map(|item| item.state.clone())
    }

    /// 最近一次服务端确认的状态
    pub fn confirmed(&self, target: &VoteTarget) -> Option<VoteState> {
        self.inner
            .items()
            .get(target)
            .map(|item| item.confirmed.clone())
    }

    /// 条目是否有未完成的投票
    pub fn is_pending(&self, target: &VoteTarget) -> bool {
        self.inner
            .items()
            .get(target)
            .map(|item| !item.pending.is_empty())
            .unwrap_or(false)
    }

    /// 点击投票
    ///
    /// 返回时本地状态已更新；请求在后台发出，同一条目的请求按点击顺序执行。
    /// 条目必须先通过 `track` / `observe` 登记，否则返回校验错误。
    /// 必须在 tokio 运行时中调用。
    pub fn vote(&self, target: &VoteTarget, click: VoteDirection) -> Result<PendingVote> {
        let key = target.key();
        let (applied, seq, mut turn) = {
            let mut items = self.inner.items();
            let item = items.get_mut(target).ok_or_else(|| {
                ClientError::validation(&format!("Votes for {} are not loaded", key))
            })?;

            let before = item.state.clone();
            let applied = before.apply(click);
            item.state = applied.clone();

            // 在同一把锁内入队，保证顺序与点击顺序一致
            let turn = self.inner.sequencer.enqueue(&key);
            let seq = turn.seq();
            item.pending.push_back(PendingMutation {
                seq,
                rollback_to: before,
            });
            (applied, seq, turn)
        };

        debug!(
            item = %key,
            direction = applied.direction.as_str(),
            tally = applied.displayed_tally,
            "Vote applied locally"
        );

        let inner = self.inner.clone();
        let target = target.clone();
        let direction = applied.direction;
        let handle = tokio::spawn(async move {
            turn.wait().await;
            let outcome = inner.api.vote(&target, direction).await;

            let key = target.key();
            match outcome {
                Ok(receipt) => {
                    let state = inner.confirm(&target, seq, receipt);
                    metrics::counter!("client_mutations_total", "outcome" => "confirmed")
                        .increment(1);
                    inner
                        .events
                        .publish(ClientEvent::MutationConfirmed { key: key.clone() });
                    debug!(item = %key, "Vote confirmed");
                    Ok(state)
                }
                Err(e) => {
                    let state = inner.roll_back(&target, seq);
                    let message = e.user_message();
                    metrics::counter!("client_mutations_total", "outcome" => "rolled_back")
                        .increment(1);
                    warn!(
                        item = %key,
                        error = %e,
                        direction = state.direction.as_str(),
                        tally = state.displayed_tally,
                        "Vote rolled back"
                    );
                    inner.events.publish(ClientEvent::MutationRolledBack {
                        key: key.clone(),
                        message: message.clone(),
                    });
                    Err(ClientError::MutationRejected {
                        key,
                        reason: message,
                    })
                }
            }
        });

        Ok(PendingVote {
            applied,
            key,
            handle,
        })
    }
}

/// 已在本地生效、等待服务端结果的投票
#[must_use = "await `settle()` or call `detach()`"]
pub struct PendingVote {
    applied: VoteState,
    key: String,
    handle: JoinHandle<Result<VoteState>>,
}

impl PendingVote {
    /// 点击后立即显示的状态
    pub fn applied(&self) -> &VoteState {
        &self.applied
    }

    /// 等待结果，返回结算后的显示状态
    pub async fn settle(self) -> Result<VoteState> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(ClientError::MutationRejected {
                key: self.key,
                reason: e.to_string(),
            }),
        }
    }

    /// 不关心结果（回滚和通知仍然会发生）
    pub fn detach(self) {
        drop(self.handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockApi;

    fn state(direction: VoteDirection, tally: i64) -> VoteState {
        VoteState::new(VoteTarget::post("1"), direction, tally)
    }

    #[test]
    fn test_apply_from_none() {
        let s = state(VoteDirection::None, 10);
        assert_eq!(s.apply(VoteDirection::Up), state(VoteDirection::Up, 11));
        assert_eq!(s.apply(VoteDirection::Down), state(VoteDirection::Down, 9));
    }

    #[test]
    fn test_apply_same_direction_undoes() {
        assert_eq!(
            state(VoteDirection::Up, 11).apply(VoteDirection::Up),
            state(VoteDirection::None, 10)
        );
        assert_eq!(
            state(VoteDirection::Down, 9).apply(VoteDirection::Down),
            state(VoteDirection::None, 10)
        );
    }

    #[test]
    fn test_apply_flip_moves_two() {
        assert_eq!(
            state(VoteDirection::Up, 11).apply(VoteDirection::Down),
            state(VoteDirection::Down, 9)
        );
        assert_eq!(
            state(VoteDirection::Down, 9).apply(VoteDirection::Up),
            state(VoteDirection::Up, 11)
        );
    }

    #[test]
    fn test_vote_on_unregistered_item_is_rejected() {
        let votes = VoteController::new(Arc::new(MockApi::new()), EventBus::default());
        let target = VoteTarget::comment("c1");

        let result = votes.vote(&target, VoteDirection::Up);

        assert!(matches!(result, Err(ClientError::Validation(_))));
        assert!(votes.state(&target).is_none());
    }
}
