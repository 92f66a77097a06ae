/// 投票的结果, 被拒绝是正常路径而不是错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    Accepted,
    Rejected(RejectReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// 文章不存在或已从 time: 里过期
    UnknownArticle,
    /// 文章发布超过一周, 投票窗口已关闭
    VotingClosed,
    /// 该用户已经投过票
    AlreadyVoted,
}

impl VoteOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, VoteOutcome::Accepted)
    }
}
