use std::panic;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, bounded};
use log::debug;
use rayon::prelude::*;

use super::{HeapTopList, TopList};
use crate::distance::{Distance, Metric};
use crate::location::Point;
use crate::ordering::Ordering;

/// 发送给工作线程的点，附带生产者分配的插入序号
type Job = (Point, u64);

/// 多个工作线程各自维护一个 `HeapTopList`，共同消费一个容量为 workers 的队列
///
/// 哪个点被哪个线程处理是不确定的，但每个线程保留的都是自己的前 k 个，
/// 全局的前 k 个必然在它们的并集中，所以合并后的结果是准确的。
///
/// 队列满时 `insert` 会阻塞调用方。查询前必须先调用 `finish`，
/// `top` 会在需要时自动调用；`finish` 之后再 `insert` 会 panic。
pub struct ParallelTopList {
    k: usize,
    ordering: Ordering,
    tx: Option<Sender<Job>>,
    handles: Vec<JoinHandle<HeapTopList>>,
    lists: Vec<HeapTopList>,
    inserted: u64,
}

impl ParallelTopList {
    pub fn new(
        workers: usize,
        metric: Metric,
        target: Point,
        k: usize,
        ordering: Ordering,
    ) -> Self {
        assert!(workers > 0, "workers must be greater than 0");

        let (tx, rx) = bounded(workers);
        let handles = (0..workers)
            .map(|i| {
                let list = HeapTopList::new(metric, target.clone(), k, ordering);
                spawn_worker(i, rx.clone(), list)
            })
            .collect();

        Self { k, ordering, tx: Some(tx), handles, lists: vec![], inserted: 0 }
    }

    pub fn workers(&self) -> usize {
        self.handles.len() + self.lists.len()
    }

    pub fn is_finished(&self) -> bool {
        self.tx.is_none()
    }
}

fn spawn_worker(i: usize, rx: Receiver<Job>, mut list: HeapTopList) -> JoinHandle<HeapTopList> {
    thread::spawn(move || {
        let mut count = 0usize;
        while let Ok((point, arrival)) = rx.recv() {
            let distance = list.metric().measure(list.target(), point, arrival);
            list.insert_distance(distance);
            count += 1;
        }
        debug!("worker {i} 处理了 {count} 个点，保留 {} 个", list.len());
        list
    })
}

impl TopList for ParallelTopList {
    fn insert(&mut self, point: &Point) {
        let tx = self.tx.as_ref().expect("insert after finish");
        // 所有工作线程都持有接收端，只有在它们全部 panic 后发送才会失败
        if tx.send((point.clone(), self.inserted)).is_err() {
            panic!("all workers have exited");
        }
        self.inserted += 1;
    }

    fn finish(&mut self) {
        // 关闭发送端后，工作线程会在队列清空后退出
        if self.tx.take().is_none() {
            return;
        }
        for handle in self.handles.drain(..) {
            match handle.join() {
                Ok(list) => self.lists.push(list),
                Err(e) => panic::resume_unwind(e),
            }
        }
        debug!("{} 个 worker 已全部退出，共插入 {} 个点", self.workers(), self.inserted);
    }

    fn top(&mut self) -> Vec<Distance> {
        self.finish();

        // 此时已经没有线程在写入，可以并发查询每个 worker 的结果
        let mut items =
            self.lists.par_iter_mut().flat_map_iter(|list| list.top()).collect::<Vec<_>>();
        self.ordering.sort(&mut items);
        items.truncate(self.k);
        items
    }

    fn k(&self) -> usize {
        self.k
    }
}

impl Drop for ParallelTopList {
    fn drop(&mut self) {
        // 不在 panic 过程中再次 join，避免 double panic
        if !thread::panicking() {
            self.finish();
        }
    }
}
