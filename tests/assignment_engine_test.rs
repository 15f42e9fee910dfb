// ==========================================
// AssignmentEngine 集成测试
// ==========================================
// 使用默认配置 (两个场地, 三个岗位) 与一个月的出勤表,
// 验证排班结果的全局性质
// ==========================================

use chrono::NaiveDate;
use production_roster::config::RosterConfig;
use production_roster::domain::{
    AvailabilityTable, DayCategory, PersonSkills, SelectionRule, SkillColumn, SkillTable,
    VacancyReason, ASSISTANT_ROLE, DIRECTOR_ROLE,
};
use production_roster::engine::{
    AssignmentEngine, AvailabilityIndex, EngineError, LookupError, RosterOutcome,
    ServiceCalendar, SkillRegistry,
};
use std::collections::HashSet;
use std::sync::Arc;

// ==========================================
// 测试辅助函数
// ==========================================

const PEOPLE: [&str; 10] = [
    "Anele", "Bongani", "Carla", "Dieter", "Eve", "Fikile", "Gert", "Hanna", "Isaac", "Jana",
];

/// 2025-08 的全部周末 (周六 2/9/16/23/30, 周日 3/10/17/24/31)
fn august_weekends() -> Vec<NaiveDate> {
    (2..=31)
        .filter(|d| d % 7 == 2 || d % 7 == 3)
        .map(|d| NaiveDate::from_ymd_opt(2025, 8, d).unwrap())
        .collect()
}

/// 构造确定性的技能表: 等级按 (人员, 列) 下标轮转
fn create_test_skills(config: &RosterConfig) -> SkillTable {
    let people = PEOPLE
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let mut person = PersonSkills::new(*name, ((i * 2) % 3) as u8);
            for (j, column) in config.required_skill_columns().iter().enumerate() {
                if let SkillColumn::Role { role, venue } = column {
                    person.set_role_level(role, venue, ((i + j) % 3) as u8);
                }
            }
            person
        })
        .collect();
    SkillTable::new(people)
}

/// 构造确定性的出勤表: 约三分之二的人每天可用
fn create_test_availability(dates: &[NaiveDate]) -> AvailabilityTable {
    let mut table = AvailabilityTable::new(dates.to_vec());
    for (i, name) in PEOPLE.iter().enumerate() {
        let flags = (0..dates.len()).map(|d| (i + d) % 3 != 0).collect();
        table.push_row(*name, flags);
    }
    table
}

struct Fixture {
    config: RosterConfig,
    registry: SkillRegistry,
    availability: AvailabilityIndex,
    calendar: ServiceCalendar,
}

fn create_fixture() -> Fixture {
    let config = RosterConfig::default();
    let dates = august_weekends();
    let table = create_test_availability(&dates);
    Fixture {
        registry: SkillRegistry::from_table(create_test_skills(&config)),
        availability: AvailabilityIndex::from_table(&table),
        calendar: ServiceCalendar::from_dates(&table.dates).unwrap(),
        config,
    }
}

fn run_fixture(fixture: &Fixture) -> RosterOutcome {
    AssignmentEngine::new(Arc::new(fixture.config.clone()))
        .run(&fixture.registry, &fixture.availability, &fixture.calendar)
        .expect("排班应成功")
}

// ==========================================
// 全局性质
// ==========================================

#[test]
fn test_every_assignment_uses_an_available_person() {
    println!("\n=== 测试：所有分配人员当天可用 ===");
    let fixture = create_fixture();
    let outcome = run_fixture(&fixture);

    assert!(!outcome.log.is_empty());
    for a in &outcome.log {
        let available = fixture.availability.available_people(a.date).unwrap();
        assert!(
            available.iter().any(|p| p == &a.person),
            "{} 在 {} 不可用却被分配为 {}",
            a.person,
            a.date,
            a.role
        );
    }
    println!("✓ 共 {} 条分配全部通过可用性检查", outcome.log.len());
}

#[test]
fn test_no_person_twice_in_one_service() {
    println!("\n=== 测试：同一场次无重复人员 ===");
    let outcome = run_fixture(&create_fixture());

    let mut seen = HashSet::new();
    for a in &outcome.log {
        assert!(
            seen.insert((a.day, a.venue.clone(), a.date, a.person.clone())),
            "{} 在 {} {} {} 出现两次",
            a.person,
            a.venue,
            a.day,
            a.date
        );
    }
}

#[test]
fn test_skill_thresholds_respected() {
    println!("\n=== 测试：技能门槛 ===");
    let fixture = create_fixture();
    let config = &fixture.config;
    let outcome = run_fixture(&fixture);

    for a in &outcome.log {
        let level = |column: SkillColumn| fixture.registry.level(&a.person, &column).unwrap();

        if a.role == DIRECTOR_ROLE {
            if a.rule == SelectionRule::SkillThreshold {
                assert!(level(SkillColumn::Director) >= config.lead_level);
            } else {
                assert_eq!(a.rule, SelectionRule::DirectorFallback);
            }
            continue;
        }

        match a.day {
            DayCategory::Sunday => {
                let (role, tier) = a.role.rsplit_once(' ').unwrap();
                let min = if tier == "Main" {
                    config.lead_level
                } else {
                    config.assist_level
                };
                assert!(level(SkillColumn::role(role, &a.venue)) >= min, "{:?}", a);
            }
            DayCategory::Saturday if a.role == ASSISTANT_ROLE => {
                assert_eq!(a.rule, SelectionRule::TrainingRotation);
                let best = config
                    .saturday_role_columns()
                    .into_iter()
                    .map(level)
                    .max()
                    .unwrap();
                assert!(best >= config.assist_level, "{:?}", a);
            }
            DayCategory::Saturday => {
                assert!(level(SkillColumn::role(&a.role, &a.venue)) >= config.lead_level);
            }
        }
    }
}

#[test]
fn test_final_counts_match_log() {
    let outcome = run_fixture(&create_fixture());

    for name in PEOPLE {
        let counted = outcome.final_counts.get(name).copied().unwrap_or(0) as usize;
        assert_eq!(counted, outcome.log.count_for(name), "{} 计数不一致", name);
    }
    let total: u32 = outcome.final_counts.values().sum();
    assert_eq!(total as usize, outcome.assignment_count());
}

#[test]
fn test_every_slot_filled_or_reported() {
    let fixture = create_fixture();
    let outcome = run_fixture(&fixture);
    let roles = fixture.config.roles.len();

    // 周日: 每场地 总监 + 每岗位 主岗/助理; 周六: 总监 + 每岗位 + 培训助理
    let sunday_slots = fixture.calendar.sunday_dates().len() * fixture.config.venues.len() * (1 + 2 * roles);
    let saturday_slots = fixture.calendar.saturday_dates().len() * (roles + 2);

    assert_eq!(
        outcome.schedule.filled_count() + outcome.unfilled_slots.len(),
        sunday_slots + saturday_slots
    );
    assert_eq!(outcome.schedule.filled_count(), outcome.assignment_count());
}

#[test]
fn test_runs_are_deterministic() {
    println!("\n=== 测试：相同输入结果一致 ===");
    let fixture = create_fixture();

    let first = run_fixture(&fixture);
    let second = run_fixture(&fixture);

    assert_eq!(first, second);
    println!("✓ 两次运行结果完全一致");
}

#[test]
fn test_load_is_spread_across_people() {
    let outcome = run_fixture(&create_fixture());

    let busiest = outcome.final_counts.values().max().copied().unwrap_or(0);
    let assigned = outcome.final_counts.values().filter(|c| **c > 0).count();

    // 10 人中大多数都应被安排, 且无人承担过半场次
    assert!(assigned >= 6, "仅 {} 人被安排", assigned);
    assert!((busiest as usize) < outcome.assignment_count() / 2);
}

// ==========================================
// 场景
// ==========================================

#[test]
fn test_scenario_single_sunday() {
    println!("\n=== 场景：单个周日, 总监优先技能达标者 ===");
    let config = RosterConfig {
        venues: vec!["X".to_string()],
        saturday_venue: "X".to_string(),
        roles: vec!["Sound".to_string()],
        ..RosterConfig::default()
    };
    let sunday = NaiveDate::from_ymd_opt(2025, 8, 3).unwrap();
    let skills = SkillTable::new(vec![
        PersonSkills::new("A", 0).with_role("Sound", "X", 2),
        PersonSkills::new("B", 2).with_role("Sound", "X", 1),
    ]);
    let mut table = AvailabilityTable::new(vec![sunday]);
    table.push_row("A", vec![true]);
    table.push_row("B", vec![true]);

    let outcome = AssignmentEngine::new(Arc::new(config))
        .run_tables(skills, &table)
        .unwrap();

    assert_eq!(outcome.schedule.get(DayCategory::Sunday, "X", sunday, "Director"), Some("B"));
    assert_eq!(outcome.schedule.get(DayCategory::Sunday, "X", sunday, "Sound Main"), Some("A"));
    assert_eq!(outcome.unfilled_slots.len(), 1);
    assert_eq!(outcome.unfilled_slots[0].reason, VacancyReason::AllEligibleUsed);
}

#[test]
fn test_unknown_person_aborts_run() {
    let config = RosterConfig::default();
    let sunday = NaiveDate::from_ymd_opt(2025, 8, 3).unwrap();
    let mut table = AvailabilityTable::new(vec![sunday]);
    table.push_row("Ghost", vec![true]);

    let result = AssignmentEngine::new(Arc::new(config)).run_tables(SkillTable::default(), &table);

    assert!(matches!(
        result,
        Err(EngineError::Lookup(LookupError::PersonNotFound { ref name })) if name == "Ghost"
    ));
}
