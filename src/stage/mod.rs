mod distinct;
mod slice;
mod sorted;

pub(crate) use distinct::DistinctSink;
pub(crate) use slice::{DropWhileSink, LimitSink, SkipSink, TakeWhileSink};
pub(crate) use sorted::SortedSink;

use crate::PipeRes;
use crate::sink::Sink;
use stage_doc::StageDoc;

/// 阶段的操作标记，求值时用于诊断和错误信息。
#[derive(Debug, Eq, PartialEq, Clone, Copy, StageDoc)]
pub enum StageKind {
    /* **************************************** 访问 **************************************** */
    /// 观察每个元素，原样向下游转发。
    Peek,
    /* **************************************** 转换 **************************************** */
    /// 对每个元素执行映射函数，转发映射结果。
    Map,
    /// 把每个元素映射为一个子序列，按顺序逐个转发子序列中的元素，子序列耗尽后才处理下一个元素。
    FlatMap,
    /* **************************************** 减少 **************************************** */
    /// 仅转发满足条件的元素。
    Filter,
    /// 去重，保留首次出现的元素及其顺序。
    Distinct,
    /// 最多转发指定数量的元素，随后请求短路。
    Limit,
    /// 丢弃开头指定数量的元素。
    Skip,
    /// 持续转发直到条件首次不满足，随后请求短路。
    TakeWhile,
    /// 持续丢弃直到条件首次不满足，之后全部转发。
    DropWhile,
    /* **************************************** 调整位置 **************************************** */
    /// 缓存全部元素，上游结束后稳定排序再转发，不能短路。
    Sorted,
}

pub(crate) struct FilterSink<'d, T, F> {
    down: &'d mut dyn Sink<T>,
    f: F,
}

impl<'d, T, F> FilterSink<'d, T, F> {
    pub(crate) fn new(down: &'d mut dyn Sink<T>, f: F) -> Self {
        FilterSink { down, f }
    }
}

impl<T, F> Sink<T> for FilterSink<'_, T, F>
where
    F: FnMut(&T) -> PipeRes<bool>,
{
    fn begin(&mut self, _size_hint: Option<usize>) -> PipeRes<()> {
        self.down.begin(None)
    }

    fn accept(&mut self, item: T) -> PipeRes<()> {
        if (self.f)(&item)? { self.down.accept(item) } else { Ok(()) }
    }

    fn end(&mut self) -> PipeRes<()> {
        self.down.end()
    }

    fn cancellation_requested(&self) -> bool {
        self.down.cancellation_requested()
    }
}

pub(crate) struct MapSink<'d, U, F> {
    down: &'d mut dyn Sink<U>,
    f: F,
}

impl<'d, U, F> MapSink<'d, U, F> {
    pub(crate) fn new(down: &'d mut dyn Sink<U>, f: F) -> Self {
        MapSink { down, f }
    }
}

impl<T, U, F> Sink<T> for MapSink<'_, U, F>
where
    F: FnMut(T) -> PipeRes<U>,
{
    fn begin(&mut self, size_hint: Option<usize>) -> PipeRes<()> {
        self.down.begin(size_hint)
    }

    fn accept(&mut self, item: T) -> PipeRes<()> {
        let mapped = (self.f)(item)?;
        self.down.accept(mapped)
    }

    fn end(&mut self) -> PipeRes<()> {
        self.down.end()
    }

    fn cancellation_requested(&self) -> bool {
        self.down.cancellation_requested()
    }
}

pub(crate) struct FlatMapSink<'d, U, F> {
    down: &'d mut dyn Sink<U>,
    f: F,
}

impl<'d, U, F> FlatMapSink<'d, U, F> {
    pub(crate) fn new(down: &'d mut dyn Sink<U>, f: F) -> Self {
        FlatMapSink { down, f }
    }
}

impl<T, U, I, F> Sink<T> for FlatMapSink<'_, U, F>
where
    I: IntoIterator<Item = U>,
    F: FnMut(T) -> PipeRes<I>,
{
    fn begin(&mut self, _size_hint: Option<usize>) -> PipeRes<()> {
        self.down.begin(None)
    }

    fn accept(&mut self, item: T) -> PipeRes<()> {
        for sub in (self.f)(item)? {
            // 下游已确定结果时不再展开剩余子元素
            if self.down.cancellation_requested() {
                break;
            }
            self.down.accept(sub)?;
        }
        Ok(())
    }

    fn end(&mut self) -> PipeRes<()> {
        self.down.end()
    }

    fn cancellation_requested(&self) -> bool {
        self.down.cancellation_requested()
    }
}

pub(crate) struct PeekSink<'d, T, F> {
    down: &'d mut dyn Sink<T>,
    f: F,
}

impl<'d, T, F> PeekSink<'d, T, F> {
    pub(crate) fn new(down: &'d mut dyn Sink<T>, f: F) -> Self {
        PeekSink { down, f }
    }
}

impl<T, F> Sink<T> for PeekSink<'_, T, F>
where
    F: FnMut(&T),
{
    fn begin(&mut self, size_hint: Option<usize>) -> PipeRes<()> {
        self.down.begin(size_hint)
    }

    fn accept(&mut self, item: T) -> PipeRes<()> {
        (self.f)(&item);
        self.down.accept(item)
    }

    fn end(&mut self) -> PipeRes<()> {
        self.down.end()
    }

    fn cancellation_requested(&self) -> bool {
        self.down.cancellation_requested()
    }
}
