pub mod collector;
mod select;

use crate::PipeRes;
use crate::err::PipeErr;
use crate::pipe::Pipe;
use crate::sink::{FnSink, Sink};
use collector::{Collector, JoinInfo, joining, to_list};
use rustc_hash::FxHashMap;
use select::{FindFirstSink, MatchSink};
use std::collections::hash_map::Entry;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/* **************************************** 终止操作 **************************************** */

impl<T: 'static> Pipe<T> {
    /// 对每个元素执行 `action`。
    pub fn for_each(&mut self, mut action: impl FnMut(T)) -> PipeRes<()> {
        self.evaluate(&mut FnSink::new(|item: T| {
            action(item);
            Ok(())
        }))
    }

    pub fn try_for_each<E: Display>(&mut self, mut action: impl FnMut(T) -> Result<(), E>) -> PipeRes<()> {
        self.evaluate(&mut FnSink::new(|item: T| action(item).map_err(|err| PipeErr::user_function("for_each", err))))
    }

    /// 无初始值的归约，空序列返回 `None`，否则以第一个元素为起点。
    pub fn reduce(&mut self, mut f: impl FnMut(T, T) -> T) -> PipeRes<Option<T>> {
        let mut acc = None;
        self.evaluate(&mut FnSink::new(|item: T| {
            acc = Some(match acc.take() {
                Some(prev) => f(prev, item),
                None => item,
            });
            Ok(())
        }))?;
        Ok(acc)
    }

    /// 顺序折叠：`result = identity`，随后对每个元素 `result = f(result, item)`。
    pub fn fold<R>(&mut self, identity: R, mut f: impl FnMut(R, T) -> R) -> PipeRes<R> {
        self.try_fold(identity, move |acc, item| Ok::<_, std::convert::Infallible>(f(acc, item)))
    }

    pub fn try_fold<R, E: Display>(&mut self, identity: R, mut f: impl FnMut(R, T) -> Result<R, E>) -> PipeRes<R> {
        // 用户函数失败时累加值已被消费，求值随即以该错误结束
        let lost = || PipeErr::user_function("fold", "accumulator is unavailable after a failed call");
        let mut acc = Some(identity);
        self.evaluate(&mut FnSink::new(|item: T| {
            let prev = acc.take().ok_or_else(lost)?;
            acc = Some(f(prev, item).map_err(|err| PipeErr::user_function("fold", err))?);
            Ok(())
        }))?;
        acc.ok_or_else(lost)
    }

    /// 带合并函数的折叠。
    ///
    /// 顺序求值不会用到 `_combiner`，保留该参数以便与分区求值的签名一致。
    pub fn reduce_with<R>(
        &mut self, identity: R, accumulator: impl FnMut(R, T) -> R, _combiner: impl FnMut(R, R) -> R,
    ) -> PipeRes<R> {
        self.fold(identity, accumulator)
    }

    pub fn collect<C: Collector<T>>(&mut self, mut collector: C) -> PipeRes<C::Output> {
        let mut acc = collector.supply();
        self.evaluate(&mut FnSink::new(|item: T| collector.accumulate(&mut acc, item)))?;
        Ok(collector.finish(acc))
    }

    pub fn collect_to_list(&mut self) -> PipeRes<Vec<T>> {
        self.collect(to_list())
    }

    /// 收集为映射，键重复时返回 [`PipeErr::DuplicateKeyErr`]，不会覆盖已有的值。
    pub fn collect_to_map<K: Eq + Hash + Debug, V>(
        &mut self, mut key_fn: impl FnMut(&T) -> K, mut value_fn: impl FnMut(T) -> V,
    ) -> PipeRes<FxHashMap<K, V>> {
        let mut map = FxHashMap::default();
        self.evaluate(&mut FnSink::new(|item: T| match map.entry(key_fn(&item)) {
            Entry::Occupied(entry) => Err(PipeErr::duplicate_key(entry.key())),
            Entry::Vacant(entry) => {
                entry.insert(value_fn(item));
                Ok(())
            }
        }))?;
        Ok(map)
    }

    /// 按条件分为两组 `(满足, 不满足)`，两组总是存在，组内保持原有顺序。
    pub fn partition_by(&mut self, mut f: impl FnMut(&T) -> bool) -> PipeRes<(Vec<T>, Vec<T>)> {
        let (mut matched, mut unmatched) = (Vec::new(), Vec::new());
        self.evaluate(&mut FnSink::new(|item: T| {
            if f(&item) { matched.push(item) } else { unmatched.push(item) }
            Ok(())
        }))?;
        Ok((matched, unmatched))
    }

    /// 按键分组，组内保持原有顺序；不保证键的顺序。
    pub fn grouping_by<K: Eq + Hash>(&mut self, key_fn: impl FnMut(&T) -> K) -> PipeRes<FxHashMap<K, Vec<T>>> {
        self.grouping_by_with(key_fn, to_list())
    }

    /// 按键分组，每组交给 `downstream` 收集。
    pub fn grouping_by_with<K: Eq + Hash, C: Collector<T>>(
        &mut self, mut key_fn: impl FnMut(&T) -> K, mut downstream: C,
    ) -> PipeRes<FxHashMap<K, C::Output>> {
        let mut groups: FxHashMap<K, C::Acc> = FxHashMap::default();
        self.evaluate(&mut FnSink::new(|item: T| {
            let acc = groups.entry(key_fn(&item)).or_insert_with(|| downstream.supply());
            downstream.accumulate(acc, item)
        }))?;
        Ok(groups.into_iter().map(|(key, acc)| (key, downstream.finish(acc))).collect())
    }

    pub fn count(&mut self) -> PipeRes<usize> {
        let mut count = 0;
        self.evaluate(&mut FnSink::new(|_item: T| {
            count += 1;
            Ok(())
        }))?;
        Ok(count)
    }

    /// 存在满足条件的元素即返回 `true`，找到后不再拉取。
    pub fn any_match(&mut self, f: impl FnMut(&T) -> bool) -> PipeRes<bool> {
        let mut sink = MatchSink::new(f, true);
        self.evaluate(&mut sink)?;
        Ok(sink.stopped())
    }

    /// 所有元素都满足条件时返回 `true`，空序列为 `true`。
    pub fn all_match(&mut self, f: impl FnMut(&T) -> bool) -> PipeRes<bool> {
        let mut sink = MatchSink::new(f, false);
        self.evaluate(&mut sink)?;
        Ok(!sink.stopped())
    }

    pub fn none_match(&mut self, f: impl FnMut(&T) -> bool) -> PipeRes<bool> {
        let mut sink = MatchSink::new(f, true);
        self.evaluate(&mut sink)?;
        Ok(!sink.stopped())
    }

    pub fn find_first(&mut self) -> PipeRes<Option<T>> {
        let mut sink = FindFirstSink::default();
        self.evaluate(&mut sink)?;
        Ok(sink.into_found())
    }
}

impl<T: 'static> Pipe<T> {
    /// 用自定义的 [`Sink`] 作为末端驱动流水线。
    ///
    /// 调用顺序与内置终止操作一致：`begin` 一次，`accept` 零到多次，`end` 一次；
    /// `cancellation_requested` 返回 `true` 后不再拉取新元素。
    pub fn drive_into(&mut self, sink: &mut dyn Sink<T>) -> PipeRes<()> {
        self.evaluate(sink)
    }
}

impl<T: Display + 'static> Pipe<T> {
    /// 合并为一个字符串，例如 `JoinInfo::new(", ", "[", "]")` 得到 `[a, b, c]`。
    pub fn join(&mut self, join_info: JoinInfo) -> PipeRes<String> {
        self.collect(joining(join_info))
    }
}
