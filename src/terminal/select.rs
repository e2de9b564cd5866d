use crate::PipeRes;
use crate::pipe::Pipe;
use crate::sink::{FnSink, Sink};
use ordered_float::OrderedFloat;
use std::cmp::Ordering;

/// 条件匹配：遇到 `f(item) == stop_on` 的元素即停止拉取。
pub(crate) struct MatchSink<F> {
    f: F,
    stop_on: bool,
    stopped: bool,
}

impl<F> MatchSink<F> {
    pub(crate) fn new(f: F, stop_on: bool) -> Self {
        MatchSink { f, stop_on, stopped: false }
    }

    pub(crate) fn stopped(&self) -> bool {
        self.stopped
    }
}

impl<T, F> Sink<T> for MatchSink<F>
where
    F: FnMut(&T) -> bool,
{
    fn accept(&mut self, item: T) -> PipeRes<()> {
        if !self.stopped && (self.f)(&item) == self.stop_on {
            self.stopped = true;
        }
        Ok(())
    }

    fn cancellation_requested(&self) -> bool {
        self.stopped
    }
}

pub(crate) struct FindFirstSink<T> {
    found: Option<T>,
}

impl<T> Default for FindFirstSink<T> {
    fn default() -> Self {
        FindFirstSink { found: None }
    }
}

impl<T> FindFirstSink<T> {
    pub(crate) fn into_found(self) -> Option<T> {
        self.found
    }
}

impl<T> Sink<T> for FindFirstSink<T> {
    fn accept(&mut self, item: T) -> PipeRes<()> {
        if self.found.is_none() {
            self.found = Some(item);
        }
        Ok(())
    }

    fn cancellation_requested(&self) -> bool {
        self.found.is_some()
    }
}

/* **************************************** 最值 **************************************** */

impl<T: 'static> Pipe<T> {
    /// 按比较函数取最大值，空序列返回 `None`，相等时保留先出现的元素。
    pub fn max_by(&mut self, mut cmp: impl FnMut(&T, &T) -> Ordering) -> PipeRes<Option<T>> {
        self.select_by(move |item, best| cmp(item, best) == Ordering::Greater)
    }

    /// 按比较函数取最小值，空序列返回 `None`，相等时保留先出现的元素。
    pub fn min_by(&mut self, mut cmp: impl FnMut(&T, &T) -> Ordering) -> PipeRes<Option<T>> {
        self.select_by(move |item, best| cmp(item, best) == Ordering::Less)
    }

    pub fn max_by_key<K: Ord>(&mut self, f: impl FnMut(&T) -> K) -> PipeRes<Option<T>> {
        self.select_by_key(f, Ordering::Greater)
    }

    pub fn min_by_key<K: Ord>(&mut self, f: impl FnMut(&T) -> K) -> PipeRes<Option<T>> {
        self.select_by_key(f, Ordering::Less)
    }

    /// 按浮点键取最大值，`NaN` 视为大于所有数值。
    pub fn max_by_float_key(&mut self, mut f: impl FnMut(&T) -> f64) -> PipeRes<Option<T>> {
        self.select_by_key(move |item| OrderedFloat(f(item)), Ordering::Greater)
    }

    /// 按浮点键取最小值，`NaN` 视为大于所有数值。
    pub fn min_by_float_key(&mut self, mut f: impl FnMut(&T) -> f64) -> PipeRes<Option<T>> {
        self.select_by_key(move |item| OrderedFloat(f(item)), Ordering::Less)
    }

    /// `replace(item, best)` 为 `true` 时用 `item` 替换当前结果。
    fn select_by(&mut self, mut replace: impl FnMut(&T, &T) -> bool) -> PipeRes<Option<T>> {
        let mut best: Option<T> = None;
        self.evaluate(&mut FnSink::new(|item: T| {
            best = match best.take() {
                Some(current) if !replace(&item, &current) => Some(current),
                _ => Some(item),
            };
            Ok(())
        }))?;
        Ok(best)
    }

    /// 每个元素的键只计算一次。
    fn select_by_key<K: Ord>(&mut self, mut f: impl FnMut(&T) -> K, wanted: Ordering) -> PipeRes<Option<T>> {
        let mut best: Option<(K, T)> = None;
        self.evaluate(&mut FnSink::new(|item: T| {
            let key = f(&item);
            best = match best.take() {
                Some((best_key, current)) if key.cmp(&best_key) != wanted => Some((best_key, current)),
                _ => Some((key, item)),
            };
            Ok(())
        }))?;
        Ok(best.map(|(_, item)| item))
    }
}

impl<T: Ord + 'static> Pipe<T> {
    pub fn max(&mut self) -> PipeRes<Option<T>> {
        self.max_by(T::cmp)
    }

    pub fn min(&mut self) -> PipeRes<Option<T>> {
        self.min_by(T::cmp)
    }
}

#[cfg(test)]
mod tests {
    use crate::pipe::Pipe;
    use crate::source::Source;

    fn words() -> Pipe<&'static str> {
        Pipe::of(["interest", "time", "food", "rabbit", "app"])
    }

    #[test]
    fn test_max_min_by_first_wins() {
        let by_len = |a: &&str, b: &&str| a.len().cmp(&b.len());
        assert_eq!(words().max_by(by_len).unwrap(), Some("interest"));
        // time 与 food 等长，保留先出现的 time
        assert_eq!(Pipe::of(["time", "food", "app", "tea"]).max_by(by_len).unwrap(), Some("time"));
        assert_eq!(words().min_by(by_len).unwrap(), Some("app"));
        assert_eq!(Pipe::of(["app", "tea"]).min_by(by_len).unwrap(), Some("app"));
        assert_eq!(Pipe::<&str>::of([]).max_by(by_len).unwrap(), None);
    }

    #[test]
    fn test_max_min_by_key() {
        assert_eq!(Pipe::of(["time", "food", "app"]).max_by_key(|s| s.len()).unwrap(), Some("time"));
        assert_eq!(Pipe::of(["app", "tea", "interest"]).min_by_key(|s| s.len()).unwrap(), Some("app"));
        assert_eq!(Pipe::<&str>::of([]).min_by_key(|s| s.len()).unwrap(), None);
    }

    #[test]
    fn test_float_key() {
        let prices = || Pipe::of([("tea", 3.5), ("app", 0.99), ("food", 12.0), ("rice", 12.0)]);
        assert_eq!(prices().max_by_float_key(|p| p.1).unwrap(), Some(("food", 12.0)));
        assert_eq!(prices().min_by_float_key(|p| p.1).unwrap(), Some(("app", 0.99)));
    }

    #[test]
    fn test_max_min() {
        let longest_a = Pipe::of(["Apple", "Ant", "Book"]).filter(|s| s.starts_with('A')).map(|s| s.len()).max();
        assert_eq!(longest_a.unwrap(), Some(5));
        assert_eq!(Source::range(-3, 3, 1).pipe().min().unwrap(), Some(-3));
        assert_eq!(Pipe::<i32>::of([]).max().unwrap(), None);
    }
}
