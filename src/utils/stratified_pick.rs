//! 分层 top-k 挑选
//!
//! 从已经排好序的候选里，按桶配额各取若干个，保证结果分布在不同的桶里，
//! 不够时再按原顺序补齐。

/// 一个桶的配额：`ceil(limit * ratio)`，至少 `floor` 个
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quota {
    pub ratio: f64,
    pub floor: usize,
}

impl Quota {
    pub const fn new(ratio: f64, floor: usize) -> Self {
        Quota { ratio, floor }
    }

    /// 该桶实际能取的数量，不超过桶里已有的个数
    pub fn count(&self, limit: usize, available: usize) -> usize {
        let wanted = (limit as f64 * self.ratio).ceil() as usize;
        wanted.max(self.floor).min(available)
    }
}

/// Picks up to `limit` items from `sorted` (best first).
///
/// Buckets are visited in the order of `quotas`; each contributes its best
/// items up to its quota. Items whose bucket index has no quota only appear
/// through the backfill, which walks `sorted` in order until `limit` is met.
/// The result keeps pick order: bucket 0 first, then bucket 1, ..., then
/// backfill.
pub fn stratified_top_k<T, F>(sorted: Vec<T>, bucket_of: F, quotas: &[Quota], limit: usize) -> Vec<T>
where
    F: Fn(&T) -> usize,
{
    if limit == 0 || sorted.is_empty() {
        return Vec::new();
    }

    let buckets: Vec<usize> = sorted.iter().map(&bucket_of).collect();
    let mut taken = vec![false; sorted.len()];
    let mut order: Vec<usize> = Vec::with_capacity(limit);

    for (bucket, quota) in quotas.iter().enumerate() {
        let members: Vec<usize> = (0..sorted.len())
            .filter(|&index| buckets[index] == bucket)
            .collect();
        let count = quota.count(limit, members.len());
        for &index in members.iter().take(count) {
            taken[index] = true;
            order.push(index);
        }
    }

    // 配额之和可能小于 limit，按原顺序补齐
    for index in 0..sorted.len() {
        if order.len() >= limit {
            break;
        }
        if !taken[index] {
            taken[index] = true;
            order.push(index);
        }
    }
    order.truncate(limit);

    let mut slots: Vec<Option<T>> = sorted.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect()
}
