use crate::PipeRes;
use crate::sink::Sink;

pub(crate) struct LimitSink<'d, T> {
    down: &'d mut dyn Sink<T>,
    remaining: usize,
}

impl<'d, T> LimitSink<'d, T> {
    pub(crate) fn new(down: &'d mut dyn Sink<T>, limit: usize) -> Self {
        LimitSink { down, remaining: limit }
    }
}

impl<T> Sink<T> for LimitSink<'_, T> {
    fn begin(&mut self, size_hint: Option<usize>) -> PipeRes<()> {
        let hint = match size_hint {
            Some(n) => n.min(self.remaining),
            None => self.remaining,
        };
        self.down.begin(Some(hint))
    }

    fn accept(&mut self, item: T) -> PipeRes<()> {
        if self.remaining > 0 {
            self.remaining -= 1;
            self.down.accept(item)
        } else {
            Ok(())
        }
    }

    fn end(&mut self) -> PipeRes<()> {
        self.down.end()
    }

    fn cancellation_requested(&self) -> bool {
        self.remaining == 0 || self.down.cancellation_requested()
    }
}

pub(crate) struct SkipSink<'d, T> {
    down: &'d mut dyn Sink<T>,
    skipping: usize,
}

impl<'d, T> SkipSink<'d, T> {
    pub(crate) fn new(down: &'d mut dyn Sink<T>, skip: usize) -> Self {
        SkipSink { down, skipping: skip }
    }
}

impl<T> Sink<T> for SkipSink<'_, T> {
    fn begin(&mut self, size_hint: Option<usize>) -> PipeRes<()> {
        self.down.begin(size_hint.map(|n| n.saturating_sub(self.skipping)))
    }

    fn accept(&mut self, item: T) -> PipeRes<()> {
        if self.skipping > 0 {
            self.skipping -= 1;
            Ok(())
        } else {
            self.down.accept(item)
        }
    }

    fn end(&mut self) -> PipeRes<()> {
        self.down.end()
    }

    fn cancellation_requested(&self) -> bool {
        self.down.cancellation_requested()
    }
}

pub(crate) struct TakeWhileSink<'d, T, F> {
    down: &'d mut dyn Sink<T>,
    f: F,
    taking: bool,
}

impl<'d, T, F> TakeWhileSink<'d, T, F> {
    pub(crate) fn new(down: &'d mut dyn Sink<T>, f: F) -> Self {
        TakeWhileSink { down, f, taking: true }
    }
}

impl<T, F> Sink<T> for TakeWhileSink<'_, T, F>
where
    F: FnMut(&T) -> PipeRes<bool>,
{
    fn begin(&mut self, _size_hint: Option<usize>) -> PipeRes<()> {
        self.down.begin(None)
    }

    fn accept(&mut self, item: T) -> PipeRes<()> {
        if self.taking && (self.f)(&item)? {
            self.down.accept(item)
        } else {
            self.taking = false;
            Ok(())
        }
    }

    fn end(&mut self) -> PipeRes<()> {
        self.down.end()
    }

    fn cancellation_requested(&self) -> bool {
        !self.taking || self.down.cancellation_requested()
    }
}

pub(crate) struct DropWhileSink<'d, T, F> {
    down: &'d mut dyn Sink<T>,
    f: F,
    dropping: bool,
}

impl<'d, T, F> DropWhileSink<'d, T, F> {
    pub(crate) fn new(down: &'d mut dyn Sink<T>, f: F) -> Self {
        DropWhileSink { down, f, dropping: true }
    }
}

impl<T, F> Sink<T> for DropWhileSink<'_, T, F>
where
    F: FnMut(&T) -> PipeRes<bool>,
{
    fn begin(&mut self, _size_hint: Option<usize>) -> PipeRes<()> {
        self.down.begin(None)
    }

    fn accept(&mut self, item: T) -> PipeRes<()> {
        if self.dropping {
            if (self.f)(&item)? {
                return Ok(());
            }
            self.dropping = false;
        }
        self.down.accept(item)
    }

    fn end(&mut self) -> PipeRes<()> {
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

    fn less_than(n: i32) -> impl FnMut(&i32) -> PipeRes<bool> {
        move |x| Ok(*x < n)
    }

    #[test]
    fn test_limit() {
        let mut record = RecordSink::<i32>::default();
        let mut sink = LimitSink::new(&mut record, 2);
        push_all(&mut sink, 1..=10).unwrap();
        assert_eq!(record.items, vec![1, 2]);
        assert_eq!(record.ends, 1);

        let mut record = RecordSink::<i32>::default();
        let mut sink = LimitSink::new(&mut record, 0);
        push_all(&mut sink, 1..=10).unwrap();
        assert!(record.items.is_empty());
    }

    #[test]
    fn test_limit_size_hint() {
        let mut record = RecordSink::<i32>::default();
        let mut sink = LimitSink::new(&mut record, 3);
        sink.begin(Some(10)).unwrap();
        sink.begin(Some(1)).unwrap();
        sink.begin(None).unwrap();
        assert_eq!(record.begins, vec![Some(3), Some(1), Some(3)]);
    }

    #[test]
    fn test_skip() {
        let mut record = RecordSink::<i32>::default();
        let mut sink = SkipSink::new(&mut record, 3);
        push_all(&mut sink, 1..=5).unwrap();
        assert_eq!(record.items, vec![4, 5]);

        let mut record = RecordSink::<i32>::default();
        let mut sink = SkipSink::new(&mut record, 9);
        push_all(&mut sink, 1..=5).unwrap();
        assert!(record.items.is_empty());
    }

    #[test]
    fn test_take_while() {
        let mut record = RecordSink::<i32>::default();
        let mut sink = TakeWhileSink::new(&mut record, less_than(3));
        push_all(&mut sink, [1, 2, 3, 1, 2]).unwrap();
        assert!(Sink::<i32>::cancellation_requested(&sink));
        assert_eq!(record.items, vec![1, 2]);
    }

    #[test]
    fn test_drop_while() {
        let mut record = RecordSink::<i32>::default();
        let mut sink = DropWhileSink::new(&mut record, less_than(3));
        push_all(&mut sink, [1, 2, 3, 1, 2]).unwrap();
        assert_eq!(record.items, vec![3, 1, 2]);
    }
}
