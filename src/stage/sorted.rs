use crate::PipeRes;
use crate::sink::Sink;
use itertools::Itertools;
use std::cmp::Ordering;

/// 排序阶段的预分配上限，避免按过大的数量提示分配内存。
const MAX_PREALLOC: usize = 4096;

/// 排序阶段：缓存全部元素，上游结束后稳定排序，再整体推送给下游。
///
/// 下游的 `begin` 推迟到排序完成后调用；排序前必须看到全部元素，因此从不向上游请求短路。
pub(crate) struct SortedSink<'d, T, F> {
    down: &'d mut dyn Sink<T>,
    cmp: F,
    buffer: Vec<T>,
}

impl<'d, T, F> SortedSink<'d, T, F> {
    pub(crate) fn new(down: &'d mut dyn Sink<T>, cmp: F) -> Self {
        SortedSink { down, cmp, buffer: Vec::new() }
    }
}

impl<T, F> Sink<T> for SortedSink<'_, T, F>
where
    F: FnMut(&T, &T) -> Ordering,
{
    fn begin(&mut self, size_hint: Option<usize>) -> PipeRes<()> {
        self.buffer = Vec::with_capacity(size_hint.map_or(0, |n| n.min(MAX_PREALLOC)));
        Ok(())
    }

    fn accept(&mut self, item: T) -> PipeRes<()> {
        self.buffer.push(item);
        Ok(())
    }

    fn end(&mut self) -> PipeRes<()> {
        let sorted = std::mem::take(&mut self.buffer).into_iter().sorted_by(&mut self.cmp);
        self.down.begin(Some(sorted.len()))?;
        for item in sorted {
            if self.down.cancellation_requested() {
                break;
            }
            self.down.accept(item)?;
        }
        self.down.end()
    }
}
