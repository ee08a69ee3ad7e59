use std::cmp;

use clap::ValueEnum;

use crate::distance::Distance;

/// 距离的排序方式，排在前面的为“更好”的结果
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    /// 距离越近越好
    Nearest,
    /// 距离越远越好
    Furthest,
}

impl Ordering {
    /// 全序比较：先比较距离，距离相同时先插入的排在前面
    pub fn compare(self, a: &Distance, b: &Distance) -> cmp::Ordering {
        let by_value = match self {
            Self::Nearest => a.value.total_cmp(&b.value),
            Self::Furthest => b.value.total_cmp(&a.value),
        };
        by_value.then_with(|| a.arrival.cmp(&b.arrival))
    }

    pub fn is_better(self, a: &Distance, b: &Distance) -> bool {
        self.compare(a, b) == cmp::Ordering::Less
    }

    pub fn sort(self, items: &mut [Distance]) {
        items.sort_by(|a, b| self.compare(a, b));
    }
}
