// ==========================================
// 教学工作量分配系统 - 命令行入口
// ==========================================
// 用法:
//   teaching-load-planner <catalog> report
//   teaching-load-planner <catalog> export <out.csv>
//   teaching-load-planner <catalog> suggest <subjectId>
//   teaching-load-planner <catalog> assign|assist <subjectId> <teacherId>
//   teaching-load-planner <catalog> remove-main <subjectId> [--yes]
//   teaching-load-planner <catalog> lock|fill <subjectId>
//   teaching-load-planner <catalog> reset [--yes]
//   teaching-load-planner <catalog> off-day <teacherId> <day>
//
// <catalog>: 含 teachers.csv + subjects.csv 的目录, 或 .xlsx 工作簿
// 数据库: TEACHING_LOAD_DB_PATH 或用户数据目录
// ==========================================

use anyhow::{anyhow, bail, Context, Result};
use std::path::PathBuf;
use teaching_load_planner::app::{
    confirmation_hint, get_default_db_path, run_command, AppState, Command, USAGE,
};
use teaching_load_planner::{logging, APP_NAME, VERSION};

fn main() -> Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (catalog_path, command) = match args.as_slice() {
        [catalog, command, rest @ ..] => match Command::parse(command, rest) {
            Some(command) => (PathBuf::from(catalog), command),
            None => bail!(USAGE),
        },
        _ => bail!(USAGE),
    };

    tracing::info!("{} v{}", APP_NAME, VERSION);

    let db_path = get_default_db_path();
    let mut state = AppState::from_catalog_path(db_path, &catalog_path)
        .with_context(|| format!("无法载入目录: {}", catalog_path.display()))?;

    let lines = run_command(&mut state.planning_api, &command).map_err(|err| {
        match confirmation_hint(&err) {
            Some(hint) => anyhow!(hint),
            None => anyhow!(err),
        }
    })?;
    for line in lines {
        println!("{}", line);
    }

    Ok(())
}
