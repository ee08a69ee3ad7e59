use std::cmp;
use std::collections::BinaryHeap;

use super::TopList;
use crate::distance::{Distance, Metric};
use crate::location::Point;
use crate::ordering::Ordering;

/// 堆中的元素，按排序方式比较，因此大顶堆的堆顶始终是当前保留结果中最差的一个
#[derive(Debug, Clone)]
struct Ranked {
    distance: Distance,
    ordering: Ordering,
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == cmp::Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.ordering.compare(&self.distance, &other.distance)
    }
}

/// 使用容量为 k 的堆保存最好的 k 个结果
///
/// 每次插入 O(logK)，总复杂度 O(N*logK)，内存占用 O(K)
pub struct HeapTopList {
    metric: Metric,
    target: Point,
    k: usize,
    ordering: Ordering,
    heap: BinaryHeap<Ranked>,
    inserted: u64,
}

impl HeapTopList {
    pub fn new(metric: Metric, target: Point, k: usize, ordering: Ordering) -> Self {
        Self {
            metric,
            target,
            k,
            ordering,
            // k 可能非常大，这里限制一下预分配的容量
            heap: BinaryHeap::with_capacity(k.saturating_add(1).min(1 << 16)),
            inserted: 0,
        }
    }

    /// 插入一个已经计算好的距离，插入序号由调用方决定
    pub fn insert_distance(&mut self, distance: Distance) {
        self.inserted += 1;
        self.heap.push(Ranked { distance, ordering: self.ordering });
        // 超出容量时弹出堆顶，被弹出的可能正是刚插入的元素
        if self.heap.len() > self.k {
            self.heap.pop();
        }
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn target(&self) -> &Point {
        &self.target
    }

    /// 当前保留的结果数量
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl TopList for HeapTopList {
    fn insert(&mut self, point: &Point) {
        let distance = self.metric.measure(&self.target, point.clone(), self.inserted);
        self.insert_distance(distance);
    }

    fn top(&mut self) -> Vec<Distance> {
        // 取出堆中全部元素会清空堆，所以取出后需要再放回去，保证可以重复查询和继续插入
        let mut items = Vec::with_capacity(self.heap.len());
        while let Some(item) = self.heap.pop() {
            items.push(item);
        }
        for item in &items {
            self.heap.push(item.clone());
        }

        let mut items = items.into_iter().map(|item| item.distance).collect::<Vec<_>>();
        self.ordering.sort(&mut items);
        items
    }

    fn k(&self) -> usize {
        self.k
    }
}
