//! 乐观更新
//! 投票和评论先在本地生效，再与服务端结果对账（确认或回滚）

pub mod comment;
pub mod sequencer;
pub mod vote;

pub use comment::{CommentController, CommentThread, PendingComment, PROVISIONAL_PREFIX};
pub use sequencer::{KeyedSequencer, Turn};
pub use vote::{PendingVote, VoteController, VoteState};
