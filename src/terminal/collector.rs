//! 归约收集器，供 [`Pipe::collect`](crate::Pipe::collect) 和
//! [`Pipe::grouping_by_with`](crate::Pipe::grouping_by_with) 使用。

use crate::PipeRes;
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::fmt::Display;
use std::hash::Hash;
use std::marker::PhantomData;

/// 可变归约：`supply` 创建累加容器，`accumulate` 逐个并入元素，`finish` 产出结果。
///
/// 分组时每个键各自 `supply` 一个容器，因此同一个收集器可以服务多个分组。
pub trait Collector<T> {
    type Acc;
    type Output;

    fn supply(&self) -> Self::Acc;

    fn accumulate(&mut self, acc: &mut Self::Acc, item: T) -> PipeRes<()>;

    fn finish(&self, acc: Self::Acc) -> Self::Output;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ToList;

pub fn to_list() -> ToList {
    ToList
}

impl<T> Collector<T> for ToList {
    type Acc = Vec<T>;
    type Output = Vec<T>;

    fn supply(&self) -> Vec<T> {
        Vec::new()
    }

    fn accumulate(&mut self, acc: &mut Vec<T>, item: T) -> PipeRes<()> {
        acc.push(item);
        Ok(())
    }

    fn finish(&self, acc: Vec<T>) -> Vec<T> {
        acc
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ToSet;

pub fn to_set() -> ToSet {
    ToSet
}

impl<T: Eq + Hash> Collector<T> for ToSet {
    type Acc = FxHashSet<T>;
    type Output = FxHashSet<T>;

    fn supply(&self) -> FxHashSet<T> {
        FxHashSet::default()
    }

    fn accumulate(&mut self, acc: &mut FxHashSet<T>, item: T) -> PipeRes<()> {
        acc.insert(item);
        Ok(())
    }

    fn finish(&self, acc: FxHashSet<T>) -> FxHashSet<T> {
        acc
    }
}

/// 收集到任意可扩展的容器，例如 `to_collection::<VecDeque<_>>()`。
pub struct ToCollection<C> {
    _container: PhantomData<fn() -> C>,
}

pub fn to_collection<C>() -> ToCollection<C> {
    ToCollection { _container: PhantomData }
}

impl<T, C: Default + Extend<T>> Collector<T> for ToCollection<C> {
    type Acc = C;
    type Output = C;

    fn supply(&self) -> C {
        C::default()
    }

    fn accumulate(&mut self, acc: &mut C, item: T) -> PipeRes<()> {
        acc.extend(std::iter::once(item));
        Ok(())
    }

    fn finish(&self, acc: C) -> C {
        acc
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Counting;

pub fn counting() -> Counting {
    Counting
}

impl<T> Collector<T> for Counting {
    type Acc = usize;
    type Output = usize;

    fn supply(&self) -> usize {
        0
    }

    fn accumulate(&mut self, acc: &mut usize, _item: T) -> PipeRes<()> {
        *acc += 1;
        Ok(())
    }

    fn finish(&self, acc: usize) -> usize {
        acc
    }
}

/// 合并参数：`<prefix><item><delimiter><item>...<postfix>`。
#[derive(Debug, PartialEq, Default, Clone)]
pub struct JoinInfo {
    pub delimiter: String,
    pub prefix: String,
    pub postfix: String,
}

impl JoinInfo {
    pub fn new(delimiter: impl Into<String>, prefix: impl Into<String>, postfix: impl Into<String>) -> JoinInfo {
        JoinInfo { delimiter: delimiter.into(), prefix: prefix.into(), postfix: postfix.into() }
    }

    pub fn with_delimiter(delimiter: impl Into<String>) -> JoinInfo {
        JoinInfo { delimiter: delimiter.into(), ..JoinInfo::default() }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Joining {
    join_info: JoinInfo,
}

pub fn joining(join_info: JoinInfo) -> Joining {
    Joining { join_info }
}

impl<T: Display> Collector<T> for Joining {
    type Acc = Vec<String>;
    type Output = String;

    fn supply(&self) -> Vec<String> {
        Vec::new()
    }

    fn accumulate(&mut self, acc: &mut Vec<String>, item: T) -> PipeRes<()> {
        acc.push(item.to_string());
        Ok(())
    }

    fn finish(&self, acc: Vec<String>) -> String {
        format!("{}{}{}", self.join_info.prefix, acc.iter().join(&self.join_info.delimiter), self.join_info.postfix)
    }
}

/// 先映射再交给下游收集器。
pub struct Mapping<F, C> {
    f: F,
    downstream: C,
}

pub fn mapping<F, C>(f: F, downstream: C) -> Mapping<F, C> {
    Mapping { f, downstream }
}

impl<T, U, F, C> Collector<T> for Mapping<F, C>
where
    F: FnMut(T) -> U,
    C: Collector<U>,
{
    type Acc = C::Acc;
    type Output = C::Output;

    fn supply(&self) -> C::Acc {
        self.downstream.supply()
    }

    fn accumulate(&mut self, acc: &mut C::Acc, item: T) -> PipeRes<()> {
        let mapped = (self.f)(item);
        self.downstream.accumulate(acc, mapped)
    }

    fn finish(&self, acc: C::Acc) -> C::Output {
        self.downstream.finish(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<T, C: Collector<T>>(mut collector: C, items: impl IntoIterator<Item = T>) -> C::Output {
        let mut acc = collector.supply();
        for item in items {
            collector.accumulate(&mut acc, item).unwrap();
        }
        collector.finish(acc)
    }

    #[test]
    fn test_to_list_and_counting() {
        assert_eq!(run(to_list(), ["interest", "time"]), vec!["interest", "time"]);
        assert_eq!(run(counting(), ["interest", "time", "food"]), 3);
        assert_eq!(run(counting(), Vec::<i32>::new()), 0);
    }

    #[test]
    fn test_to_set() {
        let set = run(to_set(), [1, 2, 2, 3, 1]);
        assert_eq!(set.len(), 3);
        assert!(set.contains(&2));
    }

    #[test]
    fn test_to_collection() {
        let deque = run(to_collection::<std::collections::VecDeque<&str>>(), ["interest", "time"]);
        assert_eq!(deque.front(), Some(&"interest"));
        assert_eq!(deque.len(), 2);
        let text = run(to_collection::<String>(), ['a', 'p', 'p']);
        assert_eq!(text, "app");
    }

    #[test]
    fn test_joining() {
        assert_eq!(run(joining(JoinInfo::with_delimiter(",")), [1, 2, 3]), "1,2,3");
        assert_eq!(run(joining(JoinInfo::new(", ", "[", "]")), ["a", "b"]), "[a, b]");
        assert_eq!(run(joining(JoinInfo::new(", ", "[", "]")), Vec::<&str>::new()), "[]");
    }

    #[test]
    fn test_mapping() {
        assert_eq!(run(mapping(|s: &str| s.len(), to_list()), ["interest", "app"]), vec![8, 3]);
        assert_eq!(run(mapping(|x: i32| x * 2, joining(JoinInfo::with_delimiter("+"))), [1, 2]), "2+4");
    }
}
