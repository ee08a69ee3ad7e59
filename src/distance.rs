use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

use crate::location::Point;

/// 地球平均半径，单位为米
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// 距离函数的统一形式
pub type DistanceFn = fn(&Point, &Point) -> f64;

/// 某个点到（隐含的）目标点的距离
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distance {
    pub point: Point,
    pub value: f64,
    /// 该点在插入序列中的位置，用于在距离相等时决定先后
    #[serde(skip)]
    pub arrival: u64,
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Distance({} = {:.6})", self.point, self.value)
    }
}

/// 使用 haversine 公式计算两点之间的大圆距离，单位为米
pub fn great_circle(p1: &Point, p2: &Point) -> f64 {
    let delta_lat = (p2.lat - p1.lat).to_radians();
    let delta_lon = (p2.lon - p1.lon).to_radians();

    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + (delta_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();

    2.0 * EARTH_RADIUS_METERS * a.sqrt().asin()
}

/// 把经纬度直接当作平面坐标计算欧氏距离，不做任何单位换算
pub fn euclidean(p1: &Point, p2: &Point) -> f64 {
    ((p1.lat - p2.lat).powi(2) + (p1.lon - p2.lon).powi(2)).sqrt()
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    /// 球面大圆距离（米）
    #[default]
    GreatCircle,
    /// 平面欧氏距离，仅适用于小范围区域
    Euclidean,
}

impl Metric {
    pub fn as_fn(self) -> DistanceFn {
        match self {
            Self::GreatCircle => great_circle,
            Self::Euclidean => euclidean,
        }
    }

    pub fn distance(self, target: &Point, point: &Point) -> f64 {
        (self.as_fn())(target, point)
    }

    /// 计算 point 到 target 的距离，并附带插入序号
    pub fn measure(self, target: &Point, point: Point, arrival: u64) -> Distance {
        let value = self.distance(target, &point);
        Distance { point, value, arrival }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> Point {
        Point::new("-", 51.925146, 4.478617)
    }

    #[test]
    fn test_great_circle_golden() {
        // 参考值来自 http://www.onlineconversion.com/map_greatcircle_distance.htm
        let cases = [
            (Point::new("", 37.1768672, -3.608897), 1758080.61312),
            (Point::new("", 52.3646188, 4.9316929), 57825.50791),
            (Point::new("", 51.9245615, 4.492032399999999), 922.23121),
            (Point::new("", -1.0, -1.0), 5907469.6376),
            (Point::new("", 1.0, 1.0), 5671935.66733),
        ];
        for (point, expected) in cases {
            let d = great_circle(&target(), &point);
            assert!((d - expected).abs() < 1e-4, "expected {expected:.8}, got {d:.8}");
        }
    }

    #[test]
    fn test_great_circle_same_point() {
        assert_eq!(great_circle(&target(), &target()), 0.0);
    }

    #[test]
    fn test_euclidean() {
        let a = Point::new("a", 0.0, 0.0);
        let b = Point::new("b", 3.0, 4.0);
        assert_eq!(euclidean(&a, &b), 5.0);
        assert_eq!(Metric::Euclidean.distance(&b, &a), 5.0);
    }

    #[test]
    fn test_measure_keeps_point() {
        let p = Point::new("x", 51.9245615, 4.492032399999999);
        let d = Metric::GreatCircle.measure(&target(), p.clone(), 7);
        assert_eq!(d.point, p);
        assert_eq!(d.arrival, 7);
        assert!((d.value - 922.23121).abs() < 1e-4);
    }
}
