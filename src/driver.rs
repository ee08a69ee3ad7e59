use log::{debug, info};

use crate::error::RecordError;
use crate::location::Point;
use crate::toplist::TopList;

/// 从数据源中读取全部坐标点，依次插入到每个 TopList 中，返回插入的点数
///
/// 遇到第一个读取错误时立即停止并返回该错误，此时不会调用 `finish`。
/// 数据源正常结束后会对每个 TopList 调用 `finish`。
pub fn fill<I>(source: I, lists: &mut [&mut dyn TopList]) -> Result<usize, RecordError>
where
    I: IntoIterator<Item = Result<Point, RecordError>>,
{
    let mut count = 0;
    for point in source {
        let point = point?;
        for list in lists.iter_mut() {
            list.insert(&point);
        }
        count += 1;
        if count % 1_000_000 == 0 {
            debug!("已读取 {count} 个点");
        }
    }

    for list in lists.iter_mut() {
        list.finish();
    }
    info!("读取完成，共 {count} 个点");

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{Distance, Metric};
    use crate::ordering::Ordering;
    use crate::source::SyntheticSource;
    use crate::toplist::{HeapTopList, ParallelTopList};

    fn ids(v: Vec<Distance>) -> Vec<String> {
        v.into_iter().map(|d| d.point.id).collect()
    }

    #[test]
    fn test_fill() {
        let target = Point::new("-", 0.0, 0.0);
        let mut nearest =
            HeapTopList::new(Metric::GreatCircle, target.clone(), 2, Ordering::Nearest);
        let mut furthest =
            ParallelTopList::new(2, Metric::GreatCircle, target.clone(), 2, Ordering::Furthest);

        let source = SyntheticSource::new(target, 10, 0.01);
        let count = fill(source, &mut [&mut nearest, &mut furthest]).unwrap();
        assert_eq!(count, 10);
        assert!(furthest.is_finished());

        assert_eq!(ids(nearest.top()), ["1", "2"]);
        assert_eq!(ids(furthest.top()), ["10", "9"]);
    }

    #[test]
    fn test_fill_stops_on_error() {
        let target = Point::new("-", 0.0, 0.0);
        let mut list = HeapTopList::new(Metric::Euclidean, target, 10, Ordering::Nearest);
        let source = vec![
            Ok(Point::new("1", 1.0, 1.0)),
            Err(RecordError::FieldCount { line: 2, found: 1 }),
            Ok(Point::new("3", 3.0, 3.0)),
        ];

        let err = fill(source, &mut [&mut list]).unwrap_err();
        assert!(matches!(err, RecordError::FieldCount { line: 2, .. }));
        assert_eq!(list.len(), 1);
    }
}
