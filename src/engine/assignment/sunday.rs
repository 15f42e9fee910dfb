// ==========================================
// 阶段 2: 周日非总监岗位
// ==========================================
// 规则 (每个周日 × 每个场地独立):
// 1) 已用集合以该场次总监为种子
// 2) 按岗位顺序: 主岗 (门槛 lead) → 助理 (门槛 assist)
// 3) 负载最低且未在本场次任职者优先
// ==========================================

use super::context::ServiceContext;
use super::AssignmentRun;
use crate::domain::skill::SkillColumn;
use crate::domain::types::{assistant_role, main_role, DayCategory};
use crate::engine::error::EngineResult;
use tracing::instrument;

impl AssignmentRun<'_> {
    #[instrument(skip(self))]
    pub(super) fn assign_sunday_roles(&mut self) -> EngineResult<()> {
        let config = self.config;
        let availability = self.availability;
        let calendar = self.calendar;

        for &date in calendar.sunday_dates() {
            let available = availability.available_people(date)?;

            for venue in &config.venues {
                let mut ctx =
                    ServiceContext::open(&self.schedule, DayCategory::Sunday, venue, date);

                for role in &config.roles {
                    let column = SkillColumn::role(role, venue);

                    let main = self.fill_from_pool(
                        &mut ctx,
                        available,
                        &column,
                        config.lead_level,
                        &main_role(role),
                        None,
                    )?;

                    self.fill_from_pool(
                        &mut ctx,
                        available,
                        &column,
                        config.assist_level,
                        &assistant_role(role),
                        main.as_deref(),
                    )?;
                }
            }
        }
        Ok(())
    }
}
