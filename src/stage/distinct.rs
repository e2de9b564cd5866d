use crate::PipeRes;
use crate::sink::Sink;
use rustc_hash::FxHashSet;
use std::hash::Hash;

/// 去重阶段，按 `key` 判断元素是否已经出现过。
pub(crate) struct DistinctSink<'d, T, K, F> {
    down: &'d mut dyn Sink<T>,
    key: F,
    seen: FxHashSet<K>,
}

impl<'d, T, K, F> DistinctSink<'d, T, K, F> {
    pub(crate) fn new(down: &'d mut dyn Sink<T>, key: F) -> Self {
        DistinctSink { down, key, seen: FxHashSet::default() }
    }
}

impl<T, K, F> Sink<T> for DistinctSink<'_, T, K, F>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    fn begin(&mut self, _size_hint: Option<usize>) -> PipeRes<()> {
        self.seen.clear();
        self.down.begin(None)
    }

    fn accept(&mut self, item: T) -> PipeRes<()> {
        // 返回 true 表示首次出现
        if self.seen.insert((self.key)(&item)) { self.down.accept(item) } else { Ok(()) }
    }

    fn end(&mut self) -> PipeRes<()> {
        self.seen = FxHashSet::default();
        self.down.end()
    }

    fn cancellation_requested(&self) -> bool {
        self.down.cancellation_requested()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::tests::{RecordSink, push_all};
    use unicase::UniCase;

    #[test]
    fn test_distinct_keeps_first_occurrence() {
        let mut record = RecordSink::<&str>::default();
        let mut sink = DistinctSink::new(&mut record, |s: &&'static str| *s);
        push_all(&mut sink, ["lambda", "lambda", "lambda", "rabbit", "app"]).unwrap();
        assert_eq!(record.items, vec!["lambda", "rabbit", "app"]);
    }

    #[test]
    fn test_distinct_by_key() {
        let mut record = RecordSink::<String>::default();
        let mut sink = DistinctSink::new(&mut record, |s: &String| UniCase::new(s.clone()));
        push_all(&mut sink, ["Abc", "aBC", "xyz", "ABC", "XYZ", "q"].map(String::from)).unwrap();
        assert_eq!(record.items, vec!["Abc", "xyz", "q"]);
    }
}
