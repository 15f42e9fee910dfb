// ==========================================
// 制作团队排班系统 - 公平负载计数
// ==========================================
// 职责: 记录本次运行中每人已分配次数, 提供"负载最低优先"排序
// 红线: 计数只增不减; 仅在单次运行内有效
// ==========================================

use std::collections::{BTreeMap, HashMap};

// ==========================================
// FairnessTracker - 负载计数器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct FairnessTracker {
    counts: HashMap<String, u32>,
}

impl FairnessTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 为已知人员初始化为 0
    pub fn with_people<I, S>(people: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            counts: people.into_iter().map(|p| (p.into(), 0)).collect(),
        }
    }

    /// 当前计数, 未登记的人员视为 0
    pub fn count(&self, person: &str) -> u32 {
        self.counts.get(person).copied().unwrap_or(0)
    }

    /// 按负载升序排序
    ///
    /// 稳定排序: 计数相同者保持输入顺序 (即可用性表的行顺序)
    pub fn order_by_load<S: AsRef<str>>(&self, mut candidates: Vec<S>) -> Vec<S> {
        candidates.sort_by_key(|c| self.count(c.as_ref()));
        candidates
    }

    /// 记录一次分配 (非幂等, 调用两次计两次)
    pub fn record(&mut self, person: &str) {
        *self.counts.entry(person.to_string()).or_insert(0) += 1;
    }

    pub fn total(&self) -> u64 {
        self.counts.values().map(|c| u64::from(*c)).sum()
    }

    /// 计数快照 (按姓名排序)
    pub fn snapshot(&self) -> BTreeMap<String, u32> {
        self.counts
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }
}
