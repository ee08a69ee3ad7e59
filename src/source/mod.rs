//! 坐标点数据源，均实现为 `Iterator<Item = Result<Point, RecordError>>`，迭代结束即表示数据读取完毕

mod csv;
mod synthetic;

pub use csv::*;
pub use synthetic::*;
