use crate::PipeRes;

/// 流水线中相邻阶段之间的推送协议。
///
/// 每个阶段和终止操作都实现此协议，上游只需调用下游的 [`Sink::accept`]，
/// 无需了解下游如何处理元素。一次求值中的调用顺序固定为：
/// `begin` 一次，`accept` 零到多次，`end` 一次。
///
/// 有状态阶段（排序）在 `begin` 准备缓存，在 `accept` 中缓存元素，
/// 在 `end` 中完成计算并向下游推送。
pub trait Sink<T> {
    /// 开始接收元素，`size_hint` 为已知的元素数量上限。
    fn begin(&mut self, size_hint: Option<usize>) -> PipeRes<()> {
        let _ = size_hint;
        Ok(())
    }

    /// 接收一个元素。
    fn accept(&mut self, item: T) -> PipeRes<()>;

    /// 上游已无更多元素。
    fn end(&mut self) -> PipeRes<()> {
        Ok(())
    }

    /// 下游是否已经确定结果，不再需要更多元素（短路）。
    fn cancellation_requested(&self) -> bool {
        false
    }
}

/// 组合后的求值函数：接收末端的 [`Sink`]，驱动源头把所有元素推送进去。
pub(crate) type Drive<T> = Box<dyn FnOnce(&mut dyn Sink<T>) -> PipeRes<()>>;

/// 闭包形式的末端，供 `for_each` 一类的终止操作使用。
pub(crate) struct FnSink<F> {
    f: F,
}

impl<F> FnSink<F> {
    pub(crate) fn new<T>(f: F) -> Self
    where
        F: FnMut(T) -> PipeRes<()>,
    {
        FnSink { f }
    }
}

impl<T, F> Sink<T> for FnSink<F>
where
    F: FnMut(T) -> PipeRes<()>,
{
    fn accept(&mut self, item: T) -> PipeRes<()> {
        (self.f)(item)
    }
}
