mod heap;
mod parallel;
mod sorted;
mod unordered;

pub use heap::*;
pub use parallel::*;
pub use sorted::*;
pub use unordered::*;

use clap::ValueEnum;

use crate::distance::{Distance, Metric};
use crate::location::Point;
use crate::ordering::Ordering;

/// 保存目标点与插入点之间的距离，并给出最好的 k 个结果
pub trait TopList {
    /// 计算 point 到目标点的距离并保存，并行实现在队列已满时会阻塞
    fn insert(&mut self, point: &Point);
    /// 通知不会再有新的点插入，只有并行实现需要，可以重复调用
    fn finish(&mut self) {}
    /// 按排序方式返回最好的 min(k, 已插入数量) 个结果
    fn top(&mut self) -> Vec<Distance>;
    /// 请求的结果数量
    fn k(&self) -> usize;
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// 仅返回最先插入的 k 个点，不排序，只用于性能对比
    Unordered,
    /// 保存全部距离，查询时整体排序
    Sort,
    /// 使用容量为 k 的堆
    Queue,
    /// 多个线程各自维护一个堆，查询时合并
    Parallel,
}

#[derive(Debug, Clone)]
pub struct TopListBuilder {
    metric: Metric,
    target: Point,
    k: usize,
    ordering: Ordering,
    workers: usize,
}

impl TopListBuilder {
    pub fn new(target: Point, k: usize) -> Self {
        Self { metric: Metric::default(), target, k, ordering: Ordering::Nearest, workers: 1 }
    }

    pub fn metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn ordering(mut self, ordering: Ordering) -> Self {
        self.ordering = ordering;
        self
    }

    /// 只对 `Method::Parallel` 生效，必须大于 0
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn build(&self, method: Method) -> Box<dyn TopList + Send> {
        let (metric, k, ordering) = (self.metric, self.k, self.ordering);
        let target = self.target.clone();
        match method {
            Method::Unordered => Box::new(UnorderedTopList::new(metric, target, k)),
            Method::Sort => Box::new(SortedTopList::new(metric, target, k, ordering)),
            Method::Queue => Box::new(HeapTopList::new(metric, target, k, ordering)),
            Method::Parallel => {
                Box::new(ParallelTopList::new(self.workers, metric, target, k, ordering))
            }
        }
    }
}
