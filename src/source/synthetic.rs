use crate::error::RecordError;
use crate::location::Point;

/// 从目标点出发沿对角线生成 count 个点，第 i 个点的 id 为 i，坐标为 target + i * delta
///
/// 距离目标点越近的点 id 越小，主要用于测试和性能测试
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    target: Point,
    count: usize,
    delta: f64,
    idx: usize,
}

impl SyntheticSource {
    pub fn new(target: Point, count: usize, delta: f64) -> Self {
        Self { target, count, delta, idx: 0 }
    }
}

impl Iterator for SyntheticSource {
    type Item = Result<Point, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.count {
            return None;
        }
        self.idx += 1;
        let offset = self.idx as f64 * self.delta;
        Some(Ok(Point::new(
            self.idx.to_string(),
            self.target.lat + offset,
            self.target.lon + offset,
        )))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.idx;
        (remaining, Some(remaining))
    }
}
