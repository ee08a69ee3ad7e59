use super::TopList;
use crate::distance::{Distance, Metric};
use crate::location::Point;
use crate::ordering::Ordering;

/// 保存所有距离，查询时整体排序后截取前 k 个
///
/// 复杂度为 O(N*logN)，内存占用为 O(N)
pub struct SortedTopList {
    metric: Metric,
    target: Point,
    k: usize,
    ordering: Ordering,
    distances: Vec<Distance>,
    sorted: bool,
}

impl SortedTopList {
    pub fn new(metric: Metric, target: Point, k: usize, ordering: Ordering) -> Self {
        Self { metric, target, k, ordering, distances: vec![], sorted: true }
    }
}

impl TopList for SortedTopList {
    fn insert(&mut self, point: &Point) {
        let arrival = self.distances.len() as u64;
        self.distances.push(self.metric.measure(&self.target, point.clone(), arrival));
        self.sorted = false;
    }

    fn top(&mut self) -> Vec<Distance> {
        // 排序结果会一直保留到下一次插入
        if !self.sorted {
            self.ordering.sort(&mut self.distances);
            self.sorted = true;
        }
        let n = self.k.min(self.distances.len());
        self.distances[..n].to_vec()
    }

    fn k(&self) -> usize {
        self.k
    }
}
