//! 惰性、可组合的序列流水线。
//!
//! 一条流水线由三部分组成：数据源 [`Source`]，若干惰性阶段（`filter`、`map`、`sorted` 等），
//! 以及一个终止操作（`collect`、`reduce`、`count` 等）。只有终止操作会触发求值，
//! 所有阶段在一次遍历中融合执行，短路操作（`limit`、`any_match`、`find_first`）
//! 可以作用于无限数据源。
//!
//! ```
//! use seqpipe::Source;
//!
//! let squares = Source::range(1, 100, 1).pipe().map(|x| x * x).filter(|x| x % 2 == 1).limit(3).collect_to_list();
//! assert_eq!(squares.unwrap(), vec![1, 9, 25]);
//! ```

mod print;

mod config;
mod err;
mod pipe;
mod sink;
mod source;
mod stage;
mod terminal;

pub use config::Config;
pub use err::PipeErr;
pub use pipe::{Pipe, PipeState};
pub use sink::Sink;
pub use source::Source;
pub use stage::StageKind;
pub use terminal::collector;
pub use terminal::collector::{Collector, JoinInfo};

/// 整数类型
pub type Integer = i64;

pub type PipeRes<T> = Result<T, PipeErr>;
