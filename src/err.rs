use crate::pipe::PipeState;
use thiserror::Error;

#[derive(Error, Debug, Eq, PartialEq)]
pub enum PipeErr {
    #[error("[User Function] Function of stage `{stage}` failed: {err}")]
    UserFunctionErr { stage: &'static str, err: String },

    #[error("[Duplicate Key] Key `{key}` is produced by more than one element")]
    DuplicateKeyErr { key: String },

    #[error("[Reuse] Pipe has already been driven, current state: {state:?}")]
    ReuseErr { state: PipeState },

    #[error("[Exhaustion] Source is pulled after it has been exhausted")]
    ExhaustionErr,
}

impl PipeErr {
    pub(crate) fn user_function(stage: &'static str, err: impl std::fmt::Display) -> PipeErr {
        PipeErr::UserFunctionErr { stage, err: err.to_string() }
    }

    pub(crate) fn duplicate_key(key: &impl std::fmt::Debug) -> PipeErr {
        PipeErr::DuplicateKeyErr { key: format!("{key:?}") }
    }

    /// 错误类别，便于调用方按类别处理。
    pub fn kind(&self) -> &'static str {
        match self {
            PipeErr::UserFunctionErr { .. } => "user_function",
            PipeErr::DuplicateKeyErr { .. } => "duplicate_key",
            PipeErr::ReuseErr { .. } => "reuse",
            PipeErr::ExhaustionErr => "exhaustion",
        }
    }
}
