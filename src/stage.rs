use bytemuck::Pod;
use std::marker::PhantomData;

pub trait Stage<In: Pod + Send, Out: Pod + Send> {
    fn process<C>(&mut self, data: &In, collector: &mut C)
    where
        C: OutputCollector<Out>;

    /// Called once after the last input item. Stages that hold back output
    /// until the end of the stream flush it here.
    #[inline(always)]
    fn finish<C>(&mut self, _collector: &mut C)
    where
        C: OutputCollector<Out>,
    {
    }
}

pub trait OutputCollector<T> {
    fn push(&mut self, item: &T);
}

impl<T, F> OutputCollector<T> for F
where
    F: FnMut(&T),
{
    #[inline(always)]
    fn push(&mut self, item: &T) {
        (self)(item);
    }
}

impl<F, In, Out> Stage<In, Out> for F
where
    F: FnMut(In) -> Option<Out>,
    In: Pod + Send,
    Out: Pod + Send,
{
    #[inline(always)]
    fn process<C>(&mut self, data: &In, collector: &mut C)
    where
        C: OutputCollector<Out>,
    {
        if let Some(out) = (self)(*data) {
            collector.push(&out);
        }
    }
}

pub struct Pipeline<S1, S2, In, Mid, Out> {
    s1: S1,
    s2: S2,
    _phantom: PhantomData<(In, Mid, Out)>,
}

impl<In, Mid, Out, S1, S2> Stage<In, Out> for Pipeline<S1, S2, In, Mid, Out>
where
    In: Pod + Send,
    Mid: Pod + Send,
    Out: Pod + Send,
    S1: Stage<In, Mid>,
    S2: Stage<Mid, Out>,
{
    #[inline(always)]
    fn process<C>(&mut self, data: &In, collector: &mut C)
    where
        C: OutputCollector<Out>,
    {
        let s2 = &mut self.s2;
        self.s1.process(data, &mut |mid: &Mid| {
            s2.process(mid, collector);
        });
    }

    fn finish<C>(&mut self, collector: &mut C)
    where
        C: OutputCollector<Out>,
    {
        // Upstream first, so its flushed items still pass through s2.
        let s2 = &mut self.s2;
        self.s1.finish(&mut |mid: &Mid| {
            s2.process(mid, collector);
        });
        self.s2.finish(collector);
    }
}

pub trait StageExt<In: Pod + Send, Mid: Pod + Send>: Stage<In, Mid> {
    #[inline(always)]
    fn pipe<Out: Pod + Send, S2: Stage<Mid, Out>>(self, s2: S2) -> Pipeline<Self, S2, In, Mid, Out>
    where
        Self: Sized,
    {
        Pipeline {
            s1: self,
            s2,
            _phantom: PhantomData,
        }
    }

    /// Pushes every item through the stage, finishes it, and returns what came out.
    fn run(&mut self, items: &[In]) -> Vec<Mid> {
        let mut out = Vec::new();
        let mut collect = |item: &Mid| out.push(*item);
        for item in items {
            self.process(item, &mut collect);
        }
        self.finish(&mut collect);
        out
    }
}

impl<S, In, Mid> StageExt<In, Mid> for S
where
    In: Pod + Send,
    Mid: Pod + Send,
    S: Stage<In, Mid>,
{
}
