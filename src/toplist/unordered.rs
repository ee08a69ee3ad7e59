use super::TopList;
use crate::distance::{Distance, Metric};
use crate::location::Point;

/// 最简单的实现：保存所有距离，返回最先插入的 k 个
///
/// NOTE: 不做任何排序，结果不满足 top-k 的要求，仅作为性能测试的基准
pub struct UnorderedTopList {
    metric: Metric,
    target: Point,
    k: usize,
    distances: Vec<Distance>,
}

impl UnorderedTopList {
    pub fn new(metric: Metric, target: Point, k: usize) -> Self {
        Self { metric, target, k, distances: vec![] }
    }
}

impl TopList for UnorderedTopList {
    fn insert(&mut self, point: &Point) {
        let arrival = self.distances.len() as u64;
        self.distances.push(self.metric.measure(&self.target, point.clone(), arrival));
    }

    fn top(&mut self) -> Vec<Distance> {
        self.distances.iter().take(self.k).cloned().collect()
    }

    fn k(&self) -> usize {
        self.k
    }
}
