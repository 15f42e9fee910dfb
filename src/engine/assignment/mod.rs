// ==========================================
// 制作团队排班系统 - 分配引擎
// ==========================================
// 职责: 按固定阶段顺序为全部服务日填充岗位
//   阶段 1: 全部总监 (周六 + 周日各场地)
//   阶段 2: 周日非总监岗位 (主岗 → 助理)
//   阶段 3: 周六非总监岗位 + 培训助理
// 输入: 技能登记表 + 可用性索引 + 服务日历
// 输出: 排班表 + 分配日志 + 空缺清单
// 红线: 贪心单遍, 不回溯; 查找失败中止整次运行
// ==========================================

mod context;
mod directors;
mod saturday;
mod sunday;


pub use context::ServiceContext;

use crate::config::RosterConfig;
use crate::domain::assignment::{Assignment, AssignmentLog};
use crate::domain::schedule::{RoleSlot, ScheduleState, ServiceKey, UnfilledSlot};
use crate::domain::skill::{AvailabilityTable, SkillColumn, SkillTable};
use crate::domain::types::{DayCategory, SelectionRule, SkillLevel, VacancyReason};
use crate::engine::availability::AvailabilityIndex;
use crate::engine::calendar::ServiceCalendar;
use crate::engine::eligibility::EligibilityFilter;
use crate::engine::error::EngineResult;
use crate::engine::fairness::FairnessTracker;
use crate::engine::skill_registry::SkillRegistry;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

// ==========================================
// RosterOutcome - 排班结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterOutcome {
    pub schedule: ScheduleState,
    pub log: AssignmentLog,
    pub unfilled_slots: Vec<UnfilledSlot>,
    pub final_counts: BTreeMap<String, u32>,
}

impl RosterOutcome {
    pub fn assignment_count(&self) -> usize {
        self.log.len()
    }
}

// ==========================================
// AssignmentEngine - 分配引擎
// ==========================================
pub struct AssignmentEngine {
    config: Arc<RosterConfig>,
}

impl AssignmentEngine {
    /// 创建新的 AssignmentEngine 实例
    ///
    /// # 参数
    /// - config: 排班配置 (只读共享)
    pub fn new(config: Arc<RosterConfig>) -> Self {
        Self { config }
    }

    /// 执行一次完整排班
    ///
    /// 每次调用都从零开始计数, 相同输入得到相同结果。
    ///
    /// # 参数
    /// - registry: 技能登记表
    /// - availability: 可用性索引
    /// - calendar: 服务日历
    ///
    /// # 返回
    /// - Ok(RosterOutcome)
    /// - Err(EngineError): 配置无效或查找失败 (不返回部分结果)
    #[instrument(skip_all, fields(
        saturdays = calendar.saturday_dates().len(),
        sundays = calendar.sunday_dates().len(),
        people = registry.len()
    ))]
    pub fn run(
        &self,
        registry: &SkillRegistry,
        availability: &AvailabilityIndex,
        calendar: &ServiceCalendar,
    ) -> EngineResult<RosterOutcome> {
        self.config.validate()?;
        info!("开始执行排班流程");

        let mut run = AssignmentRun::new(&self.config, registry, availability, calendar);

        debug!("阶段1: 分配总监");
        run.assign_directors()?;

        debug!("阶段2: 分配周日岗位");
        run.assign_sunday_roles()?;

        debug!("阶段3: 分配周六岗位");
        run.assign_saturday_roles()?;

        let outcome = run.finish();
        info!(
            assignments = outcome.log.len(),
            unfilled = outcome.unfilled_slots.len(),
            "排班流程完成"
        );
        Ok(outcome)
    }

    /// 直接从导入的两张表执行排班
    pub fn run_tables(
        &self,
        skills: SkillTable,
        availability: &AvailabilityTable,
    ) -> EngineResult<RosterOutcome> {
        let registry = SkillRegistry::from_table(skills);
        let index = AvailabilityIndex::from_table(availability);
        let calendar = ServiceCalendar::from_dates(&availability.dates)?;
        self.run(&registry, &index, &calendar)
    }
}

// ==========================================
// AssignmentRun - 单次运行的可变状态
// ==========================================
// 计数器/排班表/日志只属于本次运行, 结束即交出
pub(crate) struct AssignmentRun<'a> {
    config: &'a RosterConfig,
    calendar: &'a ServiceCalendar,
    availability: &'a AvailabilityIndex,
    filter: EligibilityFilter<'a>,
    fairness: FairnessTracker,
    schedule: ScheduleState,
    log: AssignmentLog,
    unfilled: Vec<UnfilledSlot>,
}

impl<'a> AssignmentRun<'a> {
    fn new(
        config: &'a RosterConfig,
        registry: &'a SkillRegistry,
        availability: &'a AvailabilityIndex,
        calendar: &'a ServiceCalendar,
    ) -> Self {
        let mut schedule = ScheduleState::new();
        for venue in &config.venues {
            schedule.open_service(
                ServiceKey::new(DayCategory::Sunday, venue),
                calendar.sunday_dates(),
            );
        }
        schedule.open_service(
            ServiceKey::new(DayCategory::Saturday, &config.saturday_venue),
            calendar.saturday_dates(),
        );

        Self {
            config,
            calendar,
            availability,
            filter: EligibilityFilter::new(registry),
            fairness: FairnessTracker::with_people(registry.people()),
            schedule,
            log: AssignmentLog::new(),
            unfilled: Vec::new(),
        }
    }

    /// 从候选池中选取负载最低、未在本场次任职的人员
    ///
    /// # 参数
    /// - ctx: 场次上下文 (选中后占用)
    /// - available: 当日可用人员 (表顺序)
    /// - column / min_level: 技能门槛
    /// - role: 写入排班表的岗位名
    /// - exclude: 额外排除的人员 (助理排除同岗位主岗)
    ///
    /// # 返回
    /// 选中的人员; 空缺时返回 None 并记录原因
    fn fill_from_pool(
        &mut self,
        ctx: &mut ServiceContext,
        available: &[String],
        column: &SkillColumn,
        min_level: SkillLevel,
        role: &str,
        exclude: Option<&str>,
    ) -> EngineResult<Option<String>> {
        let slot = ctx.slot(role);
        let eligible = self.filter.eligible(available, column, min_level)?;
        let eligible_count = eligible.len();

        let picked = self
            .fairness
            .order_by_load(eligible)
            .into_iter()
            .find(|p| !ctx.is_used(p) && exclude != Some(p.as_str()));

        match picked {
            Some(person) => {
                ctx.claim(&person);
                self.commit(&slot, &person, SelectionRule::SkillThreshold);
                Ok(Some(person))
            }
            None => {
                self.leave_unfilled(slot, vacancy_reason(available.len(), eligible_count));
                Ok(None)
            }
        }
    }

    /// 落定一次分配: 写排班表 + 计数 + 记日志
    fn commit(&mut self, slot: &RoleSlot, person: &str, rule: SelectionRule) {
        if let Some(previous) = self.schedule.assign(slot, person) {
            warn!(slot = %slot, previous = %previous, person = %person, "岗位被重复分配");
        }
        self.fairness.record(person);
        self.log.push(Assignment {
            person: person.to_string(),
            venue: slot.venue.clone(),
            role: slot.role.clone(),
            day: slot.day,
            date: slot.date,
            rule,
        });
        debug!(
            slot = %slot,
            person = %person,
            rule = %rule,
            load = self.fairness.count(person),
            "岗位已分配"
        );
    }

    fn leave_unfilled(&mut self, slot: RoleSlot, reason: VacancyReason) {
        debug!(slot = %slot, reason = %reason, "岗位空缺");
        self.unfilled.push(UnfilledSlot { slot, reason });
    }

    fn finish(self) -> RosterOutcome {
        RosterOutcome {
            final_counts: self.fairness.snapshot(),
            schedule: self.schedule,
            log: self.log,
            unfilled_slots: self.unfilled,
        }
    }
}

/// 空缺原因: 无人可用 / 无人达标 / 达标者均已任职
pub(crate) fn vacancy_reason(available: usize, eligible: usize) -> VacancyReason {
    if available == 0 {
        VacancyReason::NoAvailablePeople
    } else if eligible == 0 {
        VacancyReason::NoEligibleCandidate
    } else {
        VacancyReason::AllEligibleUsed
    }
}
