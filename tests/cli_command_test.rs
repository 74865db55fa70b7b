// ==========================================
// 命令行命令 集成测试
// ==========================================
// 测试范围:
// 1. 改变分配的命令执行后已保存 (重新打开可见)
// 2. 破坏性命令未带 --yes 时拒绝且不改动
// 3. 查询命令输出
// ==========================================

mod helpers;

use helpers::catalog_builder::sample_catalog;
use helpers::test_env::PlanningTestEnv;
use teaching_load_planner::app::{confirmation_hint, run_command, Command};
use teaching_load_planner::domain::Weekday;

fn cmd(command: &str, args: &[&str]) -> Command {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    Command::parse(command, &args).expect("命令应可解析")
}

#[test]
fn test_变更命令执行后立即保存() {
    println!("\n=== 测试：变更命令保存 ===");
    let mut env = PlanningTestEnv::new(sample_catalog());

    run_command(&mut env.api, &cmd("assign", &["OPT", "X"])).unwrap();
    run_command(&mut env.api, &cmd("assign", &["OPT", "Y"])).unwrap();
    run_command(&mut env.api, &cmd("assist", &["OPT", "Z"])).unwrap();
    run_command(&mut env.api, &cmd("lock", &["OPT"])).unwrap();
    run_command(&mut env.api, &cmd("off-day", &["W", "Friday"])).unwrap();

    // 模拟下一次进程启动
    let reopened = env.reopen(sample_catalog());
    let assignment = reopened.store().assignment("OPT").expect("分配应已保存");
    assert_eq!(assignment.main_teacher, "X");
    assert!(assignment.co_teachers.contains("Y"));
    assert!(assignment.assistants.contains("Z"));
    assert!(reopened.store().is_locked("OPT"));
    assert!(reopened.store().off_days("W").contains(&Weekday::Fri));
}

#[test]
fn test_fill_命令补足助教并保存() {
    let mut env = PlanningTestEnv::new(sample_catalog());
    run_command(&mut env.api, &cmd("assign", &["OPT", "X"])).unwrap();

    // 70 人 / 20 → 4 人; 候选 Y, Z, W 三人
    let lines = run_command(&mut env.api, &cmd("fill", &["OPT"])).unwrap();
    assert_eq!(lines, vec!["OPT: added Y, Z, W"]);

    let reopened = env.reopen(sample_catalog());
    assert_eq!(reopened.store().assignment("OPT").unwrap().assistants.len(), 3);
}

#[test]
fn test_锁定课程移除主讲需_yes() {
    println!("\n=== 测试：remove-main 需 --yes ===");
    let mut env = PlanningTestEnv::new(sample_catalog());
    run_command(&mut env.api, &cmd("assign", &["MECH", "Y"])).unwrap();
    run_command(&mut env.api, &cmd("lock", &["MECH"])).unwrap();

    let err = run_command(&mut env.api, &cmd("remove-main", &["MECH"])).unwrap_err();
    let hint = confirmation_hint(&err).expect("应为需确认错误");
    assert!(hint.contains("--yes"));
    assert!(env.reopen(sample_catalog()).store().assignment("MECH").is_some());

    run_command(&mut env.api, &cmd("remove-main", &["MECH", "--yes"])).unwrap();
    let reopened = env.reopen(sample_catalog());
    assert!(reopened.store().assignment("MECH").is_none());
    assert!(!reopened.store().is_locked("MECH"));
}

#[test]
fn test_reset_需_yes() {
    let mut env = PlanningTestEnv::new(sample_catalog());
    run_command(&mut env.api, &cmd("assign", &["OPT", "X"])).unwrap();
    run_command(&mut env.api, &cmd("assign", &["MECH", "Y"])).unwrap();
    run_command(&mut env.api, &cmd("lock", &["OPT"])).unwrap();

    let err = run_command(&mut env.api, &cmd("reset", &[])).unwrap_err();
    assert!(err.needs_confirmation());
    assert_eq!(env.api.store().assignment_count(), 2);

    let lines = run_command(&mut env.api, &cmd("reset", &["--yes"])).unwrap();
    assert_eq!(lines, vec!["dropped 1 unlocked assignments"]);
    assert_eq!(env.reopen(sample_catalog()).store().assignment_count(), 1);
}

#[test]
fn test_查询命令输出() {
    let mut env = PlanningTestEnv::new(sample_catalog());
    run_command(&mut env.api, &cmd("assign", &["MECH", "Y"])).unwrap();

    let report = run_command(&mut env.api, &cmd("report", &[])).unwrap();
    assert!(report.iter().any(|l| l.starts_with("== Errors (")));
    assert!(report.iter().any(|l| l.contains("Optics")), "未分配课程应报错");

    let suggestion = run_command(&mut env.api, &cmd("suggest", &["OPT"])).unwrap();
    assert_eq!(suggestion[0], "OPT: needs 4 lab assistants, has 0");

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.csv");
    let lines = run_command(
        &mut env.api,
        &cmd("export", &[out.to_str().unwrap()]),
    )
    .unwrap();
    assert!(lines[0].starts_with("exported 1 rows"));
}
