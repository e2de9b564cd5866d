use crate::err::PipeErr;
use crate::pipe::Pipe;
use crate::sink::Sink;
use crate::{Integer, PipeRes};
use std::iter::{repeat, repeat_n, repeat_with, successors};

/// 流水线的数据源，按顺序产出元素，有限或无限，只能消费一次。
pub struct Source<T> {
    iter: Box<dyn Iterator<Item = T>>,
    exhausted: bool,
}

impl<T: 'static> Source<T> {
    fn new(iter: impl Iterator<Item = T> + 'static) -> Source<T> {
        Source { iter: Box::new(iter), exhausted: false }
    }

    /// 使用直接给出的元素作为数据源。
    pub fn of(items: impl IntoIterator<Item = T, IntoIter: 'static>) -> Source<T> {
        Source::new(items.into_iter())
    }

    /// 包装已有的有序集合。
    pub fn from_collection(items: impl IntoIterator<Item = T, IntoIter: 'static>) -> Source<T> {
        Source::new(items.into_iter())
    }

    /// 由生成函数产出无限数据。
    pub fn generate(f: impl FnMut() -> T + 'static) -> Source<T> {
        Source::new(repeat_with(f))
    }

    /// 产出 `seed, f(seed), f(f(seed)), ...`，无限数据。
    pub fn iterate(seed: T, mut f: impl FnMut(&T) -> T + 'static) -> Source<T> {
        Source::new(successors(Some(seed), move |prev| Some(f(prev))))
    }

    /// 空数据源。
    pub fn empty() -> Source<T> {
        Source::new(std::iter::empty())
    }

    /// 拉取下一个元素，`None` 表示已无更多元素。
    ///
    /// 返回 `None` 之后再次拉取会得到 [`PipeErr::ExhaustionErr`]。
    pub fn next_element(&mut self) -> PipeRes<Option<T>> {
        if self.exhausted {
            return Err(PipeErr::ExhaustionErr);
        }
        match self.iter.next() {
            Some(item) => Ok(Some(item)),
            None => {
                self.exhausted = true;
                Ok(None)
            }
        }
    }

    /// 转为流水线，之后可以继续追加阶段。
    pub fn pipe(self) -> Pipe<T> {
        Pipe::from(self)
    }

    /// 把全部元素推送给 `sink`，下游请求短路时提前停止拉取。
    pub(crate) fn drive(mut self, sink: &mut dyn Sink<T>) -> PipeRes<()> {
        let (_, upper) = self.iter.size_hint();
        sink.begin(upper)?;
        while !sink.cancellation_requested() {
            match self.next_element()? {
                Some(item) => sink.accept(item)?,
                None => break,
            }
        }
        sink.end()
    }
}

impl<T: Clone + 'static> Source<T> {
    /// 重复同一个值，`count` 未指定时无限重复。
    pub fn repeat(value: T, count: Option<usize>) -> Source<T> {
        match count {
            Some(count) => Source::new(repeat_n(value, count)),
            None => Source::new(repeat(value)),
        }
    }
}

impl Source<Integer> {
    /// 生成 `[start, end]` 范围内、以 `start` 为起点按步长排列的整数，两端均包含。
    ///
    /// 步长为负时产出同一范围的逆序；起始值大于结束值时无数据；步长为 0 时无限重复起始值。
    ///
    /// ```
    /// use seqpipe::Source;
    /// let odd = Source::range(1, 9, 2).pipe().collect_to_list().unwrap();
    /// assert_eq!(odd, vec![1, 3, 5, 7, 9]);
    /// let desc = Source::range(0, 10, -3).pipe().collect_to_list().unwrap();
    /// assert_eq!(desc, vec![9, 6, 3, 0]);
    /// ```
    pub fn range(start: Integer, end: Integer, step: Integer) -> Source<Integer> {
        if start > end {
            return Source::empty();
        }
        if step == 0 {
            return Source::new(repeat(start));
        }
        let iter = RangeIter::new(start, end, step.unsigned_abs());
        if step < 0 { Source::new(iter.rev()) } else { Source::new(iter) }
    }
}

impl Source<String> {
    /// 按 `\n` 拆分文本，末尾的换行会产出一个空行。
    pub fn lines(text: String) -> Source<String> {
        Source::new(OwnedSplitLines::new(text))
    }
}

impl<T: 'static> FromIterator<T> for Source<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Source::new(iter.into_iter().collect::<Vec<_>>().into_iter())
    }
}

/// 步长网格上的闭区间 `[front, back]`，`back` 为不超过结束值的最后一个网格点。
#[derive(Debug, Eq, PartialEq)]
struct RangeIter {
    front: Integer,
    back: Integer,
    step: u64,
    done: bool,
}

impl RangeIter {
    /// 要求 `start <= end` 且 `step > 0`。
    fn new(start: Integer, end: Integer, step: u64) -> RangeIter {
        let span = (end as i128 - start as i128) as u128;
        let back = start as i128 + (span - span % step as u128) as i128;
        RangeIter { front: start, back: back as Integer, step, done: false }
    }
}

impl Iterator for RangeIter {
    type Item = Integer;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let res = self.front;
        match self.front.checked_add_unsigned(self.step) {
            Some(next) if res < self.back => self.front = next,
            _ => self.done = true,
        }
        Some(res)
    }
}

impl DoubleEndedIterator for RangeIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let res = self.back;
        match self.back.checked_sub_unsigned(self.step) {
            Some(next) if res > self.front => self.back = next,
            _ => self.done = true,
        }
        Some(res)
    }
}

#[derive(Debug)]
struct OwnedSplitLines {
    text: String,
    pos: usize,
}

impl OwnedSplitLines {
    fn new(text: String) -> Self {
        Self { text, pos: 0 }
    }
}

impl Iterator for OwnedSplitLines {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos > self.text.len() {
            return None;
        }
        let rest = &self.text[self.pos..];
        match rest.find('\n') {
            Some(idx) => {
                let line = rest[..idx].to_string();
                self.pos += idx + 1;
                Some(line)
            }
            None => {
                // 最后一行，可能为空
                let line = rest.to_string();
                self.pos = self.text.len() + 1;
                Some(line)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<T: 'static>(mut source: Source<T>) -> Vec<T> {
        let mut items = Vec::new();
        while let Some(item) = source.next_element().unwrap() {
            items.push(item);
        }
        items
    }

    #[test]
    fn test_next_element_after_exhausted() {
        let mut source = Source::of(vec![1]);
        assert_eq!(source.next_element(), Ok(Some(1)));
        assert_eq!(source.next_element(), Ok(None));
        assert_eq!(source.next_element(), Err(PipeErr::ExhaustionErr));
    }

    #[test]
    fn test_of_and_from_collection() {
        assert_eq!(drain(Source::of(["lambda", "introduce"])), vec!["lambda", "introduce"]);
        assert_eq!(drain(Source::from_collection(vec![3, 2, 1])), vec![3, 2, 1]);
        assert_eq!(drain((1..=3).collect::<Source<_>>()), vec![1, 2, 3]);
        assert!(drain(Source::<i32>::empty()).is_empty());
    }

    #[test]
    fn test_generate_and_iterate() {
        let mut n = 0;
        let mut source = Source::generate(move || {
            n += 1;
            n
        });
        assert_eq!(source.next_element(), Ok(Some(1)));
        assert_eq!(source.next_element(), Ok(Some(2)));
        let mut source = Source::iterate(1, |x| x * 2);
        let head = (0..5).map(|_| source.next_element().unwrap().unwrap()).collect::<Vec<_>>();
        assert_eq!(head, vec![1, 2, 4, 8, 16]);
    }

    #[test]
    fn test_repeat() {
        assert_eq!(drain(Source::repeat("a", Some(3))), vec!["a", "a", "a"]);
        assert!(drain(Source::repeat("a", Some(0))).is_empty());
        let mut source = Source::repeat('x', None);
        for _ in 0..100 {
            assert_eq!(source.next_element(), Ok(Some('x')));
        }
    }

    #[test]
    fn test_lines() {
        assert_eq!(drain(Source::lines("line1\nline2\nline3".to_owned())), vec!["line1", "line2", "line3"]);
        assert_eq!(drain(Source::lines(String::new())), vec![String::new()]);
        assert_eq!(drain(Source::lines("line1\nline2\n".to_owned())), vec!["line1", "line2", ""]);
        assert_eq!(drain(Source::lines("single".to_owned())), vec!["single"]);
    }

    #[test]
    fn test_range_positive() {
        assert_eq!(drain(Source::range(0, 10, 1)), (0..=10).collect::<Vec<_>>());
        assert_eq!(drain(Source::range(0, 10, 2)), (0..=10).step_by(2).collect::<Vec<_>>());
    }

    #[test]
    fn test_range_negative() {
        assert_eq!(drain(Source::range(0, 10, -1)), (0..=10).rev().collect::<Vec<_>>());
        assert_eq!(drain(Source::range(0, 10, -2)), (0..=10).rev().step_by(2).collect::<Vec<_>>());
    }

    #[test]
    fn test_range_single_and_empty() {
        assert_eq!(drain(Source::range(0, 0, 1)), vec![0]);
        assert!(drain(Source::range(10, 0, 1)).is_empty());
        assert!(drain(Source::range(10, 0, -1)).is_empty());
    }

    #[test]
    fn test_range_near_max() {
        assert_eq!(drain(Source::range(Integer::MAX - 1, Integer::MAX, 1)), vec![Integer::MAX - 1, Integer::MAX]);
        assert_eq!(drain(Source::range(Integer::MIN, Integer::MIN + 1, -1)), vec![Integer::MIN + 1, Integer::MIN]);
    }

    #[test]
    fn test_range_step_overflow() {
        // 下一个网格点超出整数范围时停止，不产出被截断的值
        assert_eq!(drain(Source::range(Integer::MAX - 3, Integer::MAX, 2)), vec![Integer::MAX - 3, Integer::MAX - 1]);
        assert_eq!(drain(Source::range(Integer::MIN, Integer::MIN + 3, -2)), vec![Integer::MIN + 2, Integer::MIN]);
        assert_eq!(drain(Source::range(Integer::MIN, Integer::MAX, Integer::MAX)), vec![Integer::MIN, -1, Integer::MAX - 1]);
        assert_eq!(drain(Source::range(0, 5, Integer::MIN)), vec![0]);
    }

    #[test]
    fn test_range_off_grid_end() {
        assert_eq!(drain(Source::range(0, 10, 3)), vec![0, 3, 6, 9]);
        assert_eq!(drain(Source::range(0, 10, -3)), vec![9, 6, 3, 0]);
        assert_eq!(drain(Source::range(-7, 7, -5)), vec![3, -2, -7]);
    }

    #[test]
    fn test_range_zero_step() {
        let mut source = Source::range(0, 1, 0);
        for _ in 0..10 {
            assert_eq!(source.next_element(), Ok(Some(0)));
        }
    }
}
