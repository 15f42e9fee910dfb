// ==========================================
// 制作团队排班系统 - 命令行入口
// ==========================================
// 子命令:
//   generate: 导入 → 排班 → 输出视图
//   check:    仅导入并校验两张表
// ==========================================

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use production_roster::config::ConfigManager;
use production_roster::engine::{
    AssignmentEngine, AvailabilityIndex, ServiceCalendar, SkillRegistry,
};
use production_roster::importer::RosterImporter;
use production_roster::logging::{self, LogFormat};
use production_roster::render::{self, CsvSheetWriter, RosterReport};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "production-roster", version, about = "周末制作团队排班")]
struct Cli {
    /// 以 JSON 格式输出日志
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 生成排班表
    Generate {
        #[command(flatten)]
        inputs: InputArgs,

        /// 输出目录
        #[arg(long, short = 'o')]
        out_dir: PathBuf,

        /// 额外写出 roster.json 完整报告
        #[arg(long)]
        json: bool,
    },
    /// 仅校验输入表
    Check {
        #[command(flatten)]
        inputs: InputArgs,
    },
}

#[derive(clap::Args, Debug)]
struct InputArgs {
    /// 技能表 (CSV / Excel)
    #[arg(long)]
    skills: PathBuf,

    /// 可用性表 (CSV / Excel)
    #[arg(long)]
    availability: PathBuf,

    /// 配置文件 (JSON, 缺省使用内置默认值)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// 导入后的输入数据
struct LoadedInputs {
    config: ConfigManager,
    registry: SkillRegistry,
    availability: AvailabilityIndex,
    calendar: ServiceCalendar,
}

fn load_inputs(args: &InputArgs) -> Result<LoadedInputs> {
    let config = ConfigManager::load_or_default(args.config.as_deref())
        .context("加载配置失败")?;
    let importer = RosterImporter::new(config.config());

    let skills = importer
        .import_skills(&args.skills)
        .with_context(|| format!("导入技能表失败: {}", args.skills.display()))?;
    let table = importer
        .import_availability(&args.availability)
        .with_context(|| format!("导入可用性表失败: {}", args.availability.display()))?;

    let calendar = ServiceCalendar::from_dates(&table.dates).context("构建服务日历失败")?;
    if !calendar.ignored_dates().is_empty() {
        warn!(ignored = calendar.ignored_dates().len(), "存在非周末日期列, 已忽略");
    }

    Ok(LoadedInputs {
        registry: SkillRegistry::from_table(skills),
        availability: AvailabilityIndex::from_table(&table),
        calendar,
        config,
    })
}

/// 可用性表中的每个人都必须在技能表中
fn verify_people(inputs: &LoadedInputs) -> Result<()> {
    let missing: Vec<&str> = inputs
        .availability
        .people()
        .iter()
        .map(String::as_str)
        .filter(|name| !inputs.registry.contains(name))
        .collect();

    if !missing.is_empty() {
        bail!("以下人员在技能表中不存在: {}", missing.join(", "));
    }
    Ok(())
}

fn generate(args: &InputArgs, out_dir: &Path, json: bool) -> Result<()> {
    let inputs = load_inputs(args)?;
    verify_people(&inputs)?;

    let engine = AssignmentEngine::new(inputs.config.shared());
    let outcome = engine
        .run(&inputs.registry, &inputs.availability, &inputs.calendar)
        .context("排班失败")?;

    let sheets = render::render_all(&outcome, inputs.config.config(), &inputs.calendar);
    let writer = CsvSheetWriter::new(out_dir);
    writer.write_all(&sheets).context("写出视图失败")?;

    if json {
        let snapshot = inputs.config.config_snapshot()?;
        let report = RosterReport::new(&outcome, &snapshot)?;
        render::write_json_report(out_dir.join("roster.json"), &report)
            .context("写出 JSON 报告失败")?;
    }

    for slot in &outcome.unfilled_slots {
        warn!(slot = %slot.slot, reason = ?slot.reason, "岗位空缺");
    }
    info!(
        assignments = outcome.assignment_count(),
        unfilled = outcome.unfilled_slots.len(),
        out_dir = %out_dir.display(),
        "排班完成"
    );
    Ok(())
}

fn check(args: &InputArgs) -> Result<()> {
    let inputs = load_inputs(args)?;
    verify_people(&inputs)?;
    info!(
        people = inputs.registry.len(),
        saturdays = inputs.calendar.saturday_dates().len(),
        sundays = inputs.calendar.sunday_dates().len(),
        "输入校验通过"
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    });

    info!("{} v{}", production_roster::APP_NAME, production_roster::VERSION);

    match &cli.command {
        Command::Generate {
            inputs,
            out_dir,
            json,
        } => generate(inputs, out_dir, *json),
        Command::Check { inputs } => check(inputs),
    }
}
