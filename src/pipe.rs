use crate::PipeRes;
use crate::config::{Config, is_nocase, is_verbose};
use crate::err::PipeErr;
use crate::sink::{Drive, Sink};
use crate::source::Source;
use crate::stage::{
    DistinctSink, DropWhileSink, FilterSink, FlatMapSink, LimitSink, MapSink, PeekSink, SkipSink, SortedSink,
    StageKind, TakeWhileSink,
};
use crate::print::{trace_err, trace_info};
use itertools::Itertools;
use std::cmp::{Ordering, Reverse};
use std::convert::Infallible;
use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;
use unicase::UniCase;

/// 一次求值的状态：`NotStarted -> Running -> Completed | Failed`。
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum PipeState {
    NotStarted,
    Running,
    Completed,
    Failed,
}

/// 由数据源和若干惰性阶段组成的流水线，元素类型为 `T`。
///
/// 追加阶段只记录操作，不做任何计算；调用终止操作时才把全部阶段从后向前组合为一个
/// [`Sink`]，从数据源拉取元素一次性推送到底。一条流水线只能求值一次，再次求值会得到
/// [`PipeErr::ReuseErr`]。
///
/// ```
/// use seqpipe::Pipe;
/// let longest = Pipe::of(["Apple", "Ant", "Book"])
///     .filter(|s| s.starts_with('A'))
///     .map(|s| s.len())
///     .max()
///     .unwrap();
/// assert_eq!(longest, Some(5));
/// ```
pub struct Pipe<T> {
    drive: Option<Drive<T>>,
    stages: Vec<StageKind>,
    configs: &'static [Config],
    state: PipeState,
}

impl<T: 'static> From<Source<T>> for Pipe<T> {
    fn from(source: Source<T>) -> Self {
        Pipe {
            drive: Some(Box::new(move |sink: &mut dyn Sink<T>| source.drive(sink))),
            stages: Vec::new(),
            configs: &[],
            state: PipeState::NotStarted,
        }
    }
}

impl<T> Debug for Pipe<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipe")
            .field("stages", &self.stages)
            .field("configs", &self.configs)
            .field("state", &self.state)
            .finish()
    }
}

impl<T: 'static> Pipe<T> {
    pub fn of(items: impl IntoIterator<Item = T, IntoIter: 'static>) -> Pipe<T> {
        Source::of(items).pipe()
    }

    pub fn from_collection(items: impl IntoIterator<Item = T, IntoIter: 'static>) -> Pipe<T> {
        Source::from_collection(items).pipe()
    }

    pub fn generate(f: impl FnMut() -> T + 'static) -> Pipe<T> {
        Source::generate(f).pipe()
    }

    /// 设置全局配置，例如 [`Config::Verbose`]。
    pub fn with_configs(mut self, configs: &'static [Config]) -> Pipe<T> {
        self.configs = configs;
        self
    }

    pub fn state(&self) -> PipeState {
        self.state
    }

    /// 已追加的阶段，按追加顺序。
    pub fn stages(&self) -> &[StageKind] {
        &self.stages
    }

    /// 追加一个阶段：`stage` 收到上游的求值函数和本阶段的下游，
    /// 负责把下游包装为本阶段的 [`Sink`] 后交给上游。
    fn then<U: 'static>(
        mut self, kind: StageKind, stage: impl FnOnce(Drive<T>, &mut dyn Sink<U>) -> PipeRes<()> + 'static,
    ) -> Pipe<U> {
        self.stages.push(kind);
        let drive = self.drive.take().map(|upstream| -> Drive<U> {
            Box::new(move |down: &mut dyn Sink<U>| stage(upstream, down))
        });
        Pipe { drive, stages: self.stages, configs: self.configs, state: self.state }
    }

    /* **************************************** 访问 **************************************** */

    pub fn peek(self, f: impl FnMut(&T) + 'static) -> Pipe<T> {
        self.then(StageKind::Peek, move |upstream, down| upstream(&mut PeekSink::new(down, f)))
    }

    /* **************************************** 转换 **************************************** */

    pub fn map<U: 'static>(self, mut f: impl FnMut(T) -> U + 'static) -> Pipe<U> {
        self.try_map(move |item| Ok::<_, Infallible>(f(item)))
    }

    /// 映射函数失败时终止求值，错误以 [`PipeErr::UserFunctionErr`] 返回给终止操作的调用方。
    pub fn try_map<U: 'static, E: Display>(self, mut f: impl FnMut(T) -> Result<U, E> + 'static) -> Pipe<U> {
        let stage = StageKind::Map;
        self.then(stage, move |upstream, down| {
            upstream(&mut MapSink::new(down, move |item| f(item).map_err(|err| PipeErr::user_function(stage.name(), err))))
        })
    }

    /// 子序列耗尽后才处理下一个元素。
    pub fn flat_map<U: 'static, I: IntoIterator<Item = U>>(self, mut f: impl FnMut(T) -> I + 'static) -> Pipe<U> {
        self.try_flat_map(move |item| Ok::<_, Infallible>(f(item)))
    }

    pub fn try_flat_map<U: 'static, I: IntoIterator<Item = U>, E: Display>(
        self, mut f: impl FnMut(T) -> Result<I, E> + 'static,
    ) -> Pipe<U> {
        let stage = StageKind::FlatMap;
        self.then(stage, move |upstream, down| {
            upstream(&mut FlatMapSink::new(down, move |item| {
                f(item).map_err(|err| PipeErr::user_function(stage.name(), err))
            }))
        })
    }

    /* **************************************** 减少 **************************************** */

    pub fn filter(self, mut f: impl FnMut(&T) -> bool + 'static) -> Pipe<T> {
        self.try_filter(move |item| Ok::<_, Infallible>(f(item)))
    }

    pub fn try_filter<E: Display>(self, mut f: impl FnMut(&T) -> Result<bool, E> + 'static) -> Pipe<T> {
        let stage = StageKind::Filter;
        self.then(stage, move |upstream, down| {
            upstream(&mut FilterSink::new(down, move |item: &T| {
                f(item).map_err(|err| PipeErr::user_function(stage.name(), err))
            }))
        })
    }

    pub fn limit(self, limit: usize) -> Pipe<T> {
        self.then(StageKind::Limit, move |upstream, down| upstream(&mut LimitSink::new(down, limit)))
    }

    pub fn skip(self, skip: usize) -> Pipe<T> {
        self.then(StageKind::Skip, move |upstream, down| upstream(&mut SkipSink::new(down, skip)))
    }

    pub fn take_while(self, mut f: impl FnMut(&T) -> bool + 'static) -> Pipe<T> {
        self.then(StageKind::TakeWhile, move |upstream, down| {
            upstream(&mut TakeWhileSink::new(down, move |item: &T| -> PipeRes<bool> { Ok(f(item)) }))
        })
    }

    pub fn drop_while(self, mut f: impl FnMut(&T) -> bool + 'static) -> Pipe<T> {
        self.then(StageKind::DropWhile, move |upstream, down| {
            upstream(&mut DropWhileSink::new(down, move |item: &T| -> PipeRes<bool> { Ok(f(item)) }))
        })
    }

    /* **************************************** 调整位置 **************************************** */

    /// 稳定排序，相等的元素保持原有的相对顺序。
    pub fn sorted_by(self, cmp: impl FnMut(&T, &T) -> Ordering + 'static) -> Pipe<T> {
        self.then(StageKind::Sorted, move |upstream, down| upstream(&mut SortedSink::new(down, cmp)))
    }

    pub fn sorted_by_key<K: Ord>(self, mut f: impl FnMut(&T) -> K + 'static) -> Pipe<T> {
        self.sorted_by(move |a, b| f(a).cmp(&f(b)))
    }

    /// 依次返回各阶段名称，例如 `filter -> map -> sorted`。
    fn describe(&self) -> String {
        if self.stages.is_empty() { "(none)".to_owned() } else { self.stages.iter().map(StageKind::name).join(" -> ") }
    }

    /// 用给定的末端驱动整条流水线，只允许调用一次。
    pub(crate) fn evaluate(&mut self, sink: &mut dyn Sink<T>) -> PipeRes<()> {
        let drive = match (self.state, self.drive.take()) {
            (PipeState::NotStarted, Some(drive)) => drive,
            (state, _) => {
                if is_verbose(self.configs) {
                    trace_err!("pipe reused in state {state:?}");
                }
                return Err(PipeErr::ReuseErr { state });
            }
        };
        self.state = PipeState::Running;
        if is_verbose(self.configs) {
            trace_info!("evaluate stages: {}", self.describe());
        }
        let res = drive(sink);
        self.state = if res.is_ok() { PipeState::Completed } else { PipeState::Failed };
        if is_verbose(self.configs) {
            match &res {
                Ok(()) => trace_info!("evaluate completed"),
                Err(err) => trace_err!("evaluate failed: {err}"),
            }
        }
        res
    }
}

impl<T: Ord + 'static> Pipe<T> {
    pub fn sorted(self) -> Pipe<T> {
        self.sorted_by(T::cmp)
    }
}

impl<T: Eq + Hash + Clone + 'static> Pipe<T> {
    /// 去重，相等判断依据 `Eq + Hash`。
    pub fn distinct(self) -> Pipe<T> {
        self.then(StageKind::Distinct, move |upstream, down| {
            upstream(&mut DistinctSink::new(down, |item: &T| item.clone()))
        })
    }
}

impl Pipe<String> {
    /// 文本去重，`nocase` 或全局 [`Config::NoCase`] 时忽略大小写，保留首次出现的写法。
    pub fn distinct_text(self, nocase: bool) -> Pipe<String> {
        if is_nocase(nocase, self.configs) {
            self.then(StageKind::Distinct, move |upstream, down| {
                upstream(&mut DistinctSink::new(down, |item: &String| UniCase::new(item.clone())))
            })
        } else {
            self.distinct()
        }
    }

    /// 文本排序，`nocase` 或全局 [`Config::NoCase`] 时忽略大小写，`desc` 时逆序。
    pub fn sorted_text(self, nocase: bool, desc: bool) -> Pipe<String> {
        match (is_nocase(nocase, self.configs), desc) {
            (true, true) => self.sorted_by_key(|item| Reverse(UniCase::new(item.clone()))),
            (true, false) => self.sorted_by_key(|item| UniCase::new(item.clone())),
            (false, true) => self.sorted_by(|a, b| b.cmp(a)),
            (false, false) => self.sorted(),
        }
    }
}
