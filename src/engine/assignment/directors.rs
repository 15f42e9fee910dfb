// ==========================================
// 阶段 1: 总监分配
// ==========================================
// 规则:
// 1) 遍历全部服务日 (先周六, 后周日)
// 2) 候选池 = 可用且总监等级 >= 主岗门槛; 若为空则降级为全部可用人员
// 3) 取负载最低者
// 4) 周日各场地独立选取, 场地之间不互斥
// ==========================================

use super::AssignmentRun;
use crate::domain::schedule::RoleSlot;
use crate::domain::skill::SkillColumn;
use crate::domain::types::{DayCategory, SelectionRule, VacancyReason, DIRECTOR_ROLE};
use crate::engine::error::EngineResult;
use chrono::NaiveDate;
use tracing::{instrument, warn};

impl AssignmentRun<'_> {
    #[instrument(skip(self))]
    pub(super) fn assign_directors(&mut self) -> EngineResult<()> {
        let config = self.config;
        let calendar = self.calendar;
        let availability = self.availability;

        for (day, date) in calendar.service_dates() {
            let available = availability.available_people(date)?;

            match day {
                DayCategory::Saturday => {
                    self.assign_director(day, &config.saturday_venue, date, available)?;
                }
                DayCategory::Sunday => {
                    // 各场地使用同一可用集合, 不做跨场地排除
                    for venue in &config.venues {
                        self.assign_director(day, venue, date, available)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn assign_director(
        &mut self,
        day: DayCategory,
        venue: &str,
        date: NaiveDate,
        available: &[String],
    ) -> EngineResult<()> {
        let slot = RoleSlot::new(day, venue, date, DIRECTOR_ROLE);

        let qualified = self
            .filter
            .eligible(available, &SkillColumn::Director, self.config.lead_level)?;
        let (pool, rule) = if qualified.is_empty() {
            (available.to_vec(), SelectionRule::DirectorFallback)
        } else {
            (qualified, SelectionRule::SkillThreshold)
        };

        match self.fairness.order_by_load(pool).into_iter().next() {
            Some(director) => {
                if rule == SelectionRule::DirectorFallback {
                    warn!(
                        date = %date,
                        venue = %venue,
                        director = %director,
                        "无人达到总监门槛, 降级选取"
                    );
                }
                self.commit(&slot, &director, rule);
            }
            None => self.leave_unfilled(slot, VacancyReason::NoAvailablePeople),
        }
        Ok(())
    }
}
