// ==========================================
// 阶段 3: 周六非总监岗位
// ==========================================
// 规则 (每个周六, 单一场地):
// 1) 各岗位只设主岗 (门槛 lead), 岗位名不带 Main 后缀
// 2) 另设一个跨岗位助理: 任一岗位技能 >= assist 即可
//    按 (总技能, 负载) 升序, 偏向技能较低/负载较低的人员 (培训轮换位)
// ==========================================

use super::context::ServiceContext;
use super::{vacancy_reason, AssignmentRun};
use crate::domain::skill::SkillColumn;
use crate::domain::types::{DayCategory, SelectionRule, ASSISTANT_ROLE};
use crate::engine::error::EngineResult;
use tracing::instrument;

impl AssignmentRun<'_> {
    #[instrument(skip(self))]
    pub(super) fn assign_saturday_roles(&mut self) -> EngineResult<()> {
        let config = self.config;
        let availability = self.availability;
        let calendar = self.calendar;
        let venue = config.saturday_venue.as_str();

        for &date in calendar.saturday_dates() {
            let available = availability.available_people(date)?;
            let mut ctx = ServiceContext::open(&self.schedule, DayCategory::Saturday, venue, date);

            for role in &config.roles {
                let column = SkillColumn::role(role, venue);
                self.fill_from_pool(&mut ctx, available, &column, config.lead_level, role, None)?;
            }

            self.assign_training_assistant(&mut ctx, available)?;
        }
        Ok(())
    }

    fn assign_training_assistant(
        &mut self,
        ctx: &mut ServiceContext,
        available: &[String],
    ) -> EngineResult<()> {
        let slot = ctx.slot(ASSISTANT_ROLE);
        let role_columns = self.config.saturday_role_columns();
        let mut skill_columns = role_columns.clone();
        skill_columns.push(SkillColumn::Director);

        // (姓名, 总技能), 保持可用性表顺序以便稳定排序
        let mut pool: Vec<(String, u32)> = Vec::new();
        let mut eligible_count = 0;
        for person in available {
            if !self
                .filter
                .meets_any(person, &role_columns, self.config.assist_level)?
            {
                continue;
            }
            eligible_count += 1;
            if ctx.is_used(person) {
                continue;
            }
            let total = self.filter.registry().total_level(person, &skill_columns)?;
            pool.push((person.clone(), total));
        }

        let fairness = &self.fairness;
        pool.sort_by_key(|(person, total)| (*total, fairness.count(person)));

        match pool.into_iter().next() {
            Some((assistant, _)) => {
                ctx.claim(&assistant);
                self.commit(&slot, &assistant, SelectionRule::TrainingRotation);
            }
            None => {
                self.leave_unfilled(slot, vacancy_reason(available.len(), eligible_count));
            }
        }
        Ok(())
    }
}
