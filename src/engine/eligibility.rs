// ==========================================
// 制作团队排班系统 - 技能准入过滤
// ==========================================
// 职责: 按技能门槛过滤候选人
// 输入: 候选人列表 (有序) + 技能列 + 门槛
// 输出: 满足门槛的候选人 (保持输入顺序)
// 红线: 查找失败向上传播, 不吞错
// ==========================================

use crate::domain::skill::SkillColumn;
use crate::domain::types::SkillLevel;
use crate::engine::error::LookupError;
use crate::engine::skill_registry::SkillRegistry;

// ==========================================
// EligibilityFilter - 技能准入过滤器
// ==========================================
pub struct EligibilityFilter<'a> {
    registry: &'a SkillRegistry,
}

impl<'a> EligibilityFilter<'a> {
    pub fn new(registry: &'a SkillRegistry) -> Self {
        Self { registry }
    }

    /// 保留 level(candidate, column) >= min_level 的候选人
    pub fn eligible<S>(
        &self,
        candidates: &[S],
        column: &SkillColumn,
        min_level: SkillLevel,
    ) -> Result<Vec<S>, LookupError>
    where
        S: AsRef<str> + Clone,
    {
        let mut kept = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if self.registry.level(candidate.as_ref(), column)? >= min_level {
                kept.push(candidate.clone());
            }
        }
        Ok(kept)
    }

    /// 任一技能列满足门槛即可
    pub fn meets_any(
        &self,
        candidate: &str,
        columns: &[SkillColumn],
        min_level: SkillLevel,
    ) -> Result<bool, LookupError> {
        for column in columns {
            if self.registry.level(candidate, column)? >= min_level {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn registry(&self) -> &SkillRegistry {
        self.registry
    }
}
