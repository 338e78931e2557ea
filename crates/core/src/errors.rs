use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Stake out of range: {amount} (min: {min}, max: {max})")]
    StakeOutOfRange { amount: u64, min: u64, max: u64 },

    #[error("Invalid stake: {0}")]
    InvalidStake(String),

    #[error("Balance overflow in operation")]
    BalanceOverflow,

    #[error("Insufficient funds: need {need} ObroBucks, have {have}")]
    InsufficientFunds { need: u64, have: u64 },

    #[error("Maximum possible win must be positive and finite, got {0}")]
    InvalidRewardBounds(f64),

    #[error("Win amount must be a finite number")]
    InvalidWinAmount,

    #[error("Invalid end date: {0}")]
    InvalidEndDate(String),

    #[error("Invalid poll: {0}")]
    InvalidPoll(String),

    #[error("Poll {0} is not open for betting")]
    PollClosed(i64),
}
