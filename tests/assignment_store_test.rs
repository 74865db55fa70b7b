// ==========================================
// AssignmentStore 集成测试
// ==========================================
// 测试范围:
// 1. 拖入教师: 新建主讲 / 追加合讲 / 幂等
// 2. 助教: 添加、角色互斥、无分配时 NotFound
// 3. 移除: 主讲删除整条分配、合讲/助教单独移除
// 4. 锁定与清空未锁定分配
// 5. 教师休息日
// ==========================================

mod helpers;

use helpers::catalog_builder::{sample_catalog, SubjectBuilder, TeacherBuilder};
use teaching_load_planner::domain::{Role, Weekday};
use teaching_load_planner::repository::{AssignOutcome, AssignmentStore, MemberOutcome};

fn new_store() -> AssignmentStore {
    AssignmentStore::new(sample_catalog())
}

// ==========================================
// 拖入教师
// ==========================================

#[test]
fn test_assign_首位教师成为主讲() {
    println!("\n=== 测试：首位教师成为主讲 ===");
    let mut store = new_store();

    let outcome = store.assign("OPT", "X").unwrap();
    assert_eq!(outcome, AssignOutcome::CreatedMain);

    let assignment = store.assignment("OPT").expect("分配应存在");
    assert_eq!(assignment.main_teacher, "X");
    assert!(assignment.co_teachers.is_empty());
    assert!(assignment.assistants.is_empty());
    assert_eq!(
        (assignment.assigned_le, assignment.assigned_tu, assignment.assigned_pr),
        (3, 0, 2),
        "课时应全额复制自课程"
    );
}

#[test]
fn test_assign_第二位教师成为合讲() {
    println!("\n=== 测试：第二位教师成为合讲 ===");
    let mut store = new_store();

    store.assign("OPT", "X").unwrap();
    let outcome = store.assign("OPT", "Y").unwrap();
    assert_eq!(outcome, AssignOutcome::AddedCoTeacher);

    let assignment = store.assignment("OPT").unwrap();
    assert_eq!(assignment.main_teacher, "X");
    assert_eq!(assignment.co_teachers.len(), 1);
    assert!(assignment.co_teachers.contains("Y"));
}

#[test]
fn test_assign_合讲与助教按加入顺序追加() {
    println!("\n=== 测试：合讲/助教按加入顺序追加 ===");
    let mut store = new_store();

    store.assign("OPT", "Y").unwrap();
    store.assign("OPT", "Z").unwrap();
    store.assign("OPT", "X").unwrap();
    store.add_assistant("OPT", "W").unwrap();

    let assignment = store.assignment("OPT").unwrap();
    assert_eq!(assignment.co_teachers.iter().collect::<Vec<_>>(), vec!["Z", "X"]);

    // 移除后重新加入排到末尾
    store.remove_co_teacher("OPT", "Z").unwrap();
    store.assign("OPT", "Z").unwrap();
    let assignment = store.assignment("OPT").unwrap();
    assert_eq!(assignment.co_teachers.iter().collect::<Vec<_>>(), vec!["X", "Z"]);
    assert_eq!(assignment.assistants.iter().collect::<Vec<_>>(), vec!["W"]);
}

#[test]
fn test_assign_重复拖入保持不变() {
    println!("\n=== 测试：重复拖入幂等 ===");
    let mut store = new_store();

    store.assign("OPT", "X").unwrap();
    store.assign("OPT", "Y").unwrap();
    let before = store.assignment("OPT").unwrap().clone();

    assert_eq!(
        store.assign("OPT", "X").unwrap(),
        AssignOutcome::Unchanged(Role::Main)
    );
    assert_eq!(
        store.assign("OPT", "Y").unwrap(),
        AssignOutcome::Unchanged(Role::CoTeacher)
    );
    assert_eq!(store.assignment("OPT").unwrap(), &before);
}

#[test]
fn test_assign_助教再拖入不升级为合讲() {
    let mut store = new_store();

    store.assign("OPT", "X").unwrap();
    store.add_assistant("OPT", "Z").unwrap();

    assert_eq!(
        store.assign("OPT", "Z").unwrap(),
        AssignOutcome::Unchanged(Role::LabAssistant)
    );
    let assignment = store.assignment("OPT").unwrap();
    assert!(!assignment.co_teachers.contains("Z"));
    assert!(assignment.assistants.contains("Z"));
}

#[test]
fn test_assign_未知课程或教师返回NotFound() {
    let mut store = new_store();

    assert!(store.assign("NOPE", "X").unwrap_err().is_not_found());
    assert!(store.assign("OPT", "NOPE").unwrap_err().is_not_found());
    assert_eq!(store.assignment_count(), 0);
}

// ==========================================
// 助教
// ==========================================

#[test]
fn test_add_assistant_无分配时返回NotFound() {
    println!("\n=== 测试：未分配课程添加助教 ===");
    let mut store = new_store();

    let err = store.add_assistant("OPT", "Z").unwrap_err();
    assert!(err.is_not_found());
    assert!(store.assignment("OPT").is_none(), "不应隐式创建分配");
}

#[test]
fn test_add_assistant_角色互斥() {
    let mut store = new_store();

    store.assign("OPT", "X").unwrap();
    store.assign("OPT", "Y").unwrap();

    assert_eq!(
        store.add_assistant("OPT", "X").unwrap(),
        MemberOutcome::Unchanged(Role::Main)
    );
    assert_eq!(
        store.add_assistant("OPT", "Y").unwrap(),
        MemberOutcome::Unchanged(Role::CoTeacher)
    );
    assert_eq!(store.add_assistant("OPT", "Z").unwrap(), MemberOutcome::Added);
    assert_eq!(
        store.add_assistant("OPT", "Z").unwrap(),
        MemberOutcome::Unchanged(Role::LabAssistant)
    );

    let assignment = store.assignment("OPT").unwrap();
    assert_eq!(assignment.assistants.len(), 1);
    assert_eq!(store.role_of("OPT", "Z"), Some(Role::LabAssistant));
    assert_eq!(store.role_of("OPT", "W"), None);
}

// ==========================================
// 移除
// ==========================================

#[test]
fn test_remove_main_删除整条分配() {
    println!("\n=== 测试：移除主讲删除整条分配 ===");
    let mut store = new_store();

    store.assign("OPT", "X").unwrap();
    store.assign("OPT", "Y").unwrap();
    store.add_assistant("OPT", "Z").unwrap();

    let removed = store.remove_main("OPT").expect("应返回被删除的分配");
    assert_eq!(removed.main_teacher, "X");
    assert!(store.assignment("OPT").is_none());
    assert_eq!(store.role_of("OPT", "Y"), None, "合讲一并丢弃");
    assert_eq!(store.role_of("OPT", "Z"), None, "助教一并丢弃");

    // 无分配时为空操作
    assert!(store.remove_main("OPT").is_none());
}

#[test]
fn test_remove_main_同时解除锁定() {
    let mut store = new_store();

    store.assign("OPT", "X").unwrap();
    assert!(store.toggle_lock("OPT").unwrap());

    store.remove_main("OPT");
    assert!(!store.is_locked("OPT"));
}

#[test]
fn test_remove_co_teacher_and_assistant() {
    let mut store = new_store();

    store.assign("OPT", "X").unwrap();
    store.assign("OPT", "Y").unwrap();
    store.add_assistant("OPT", "Z").unwrap();

    assert!(store.remove_co_teacher("OPT", "Y").unwrap());
    assert!(!store.remove_co_teacher("OPT", "Y").unwrap(), "再次移除为空操作");
    assert!(!store.remove_co_teacher("OPT", "Z").unwrap(), "助教不是合讲");

    assert!(store.remove_assistant("OPT", "Z").unwrap());
    assert!(!store.remove_assistant("OPT", "Z").unwrap());

    let assignment = store.assignment("OPT").unwrap();
    assert_eq!(assignment.main_teacher, "X");
    assert!(assignment.co_teachers.is_empty());
    assert!(assignment.assistants.is_empty());

    assert!(store.remove_co_teacher("MECH", "X").unwrap_err().is_not_found());
    assert!(store.remove_assistant("MECH", "X").unwrap_err().is_not_found());
}

// ==========================================
// 锁定 / 清空
// ==========================================

#[test]
fn test_toggle_lock_与分配无关() {
    let mut store = new_store();

    assert!(store.toggle_lock("MECH").unwrap(), "未分配课程也可锁定");
    assert!(store.is_locked("MECH"));
    assert!(!store.toggle_lock("MECH").unwrap());
    assert!(!store.is_locked("MECH"));

    assert!(store.toggle_lock("NOPE").unwrap_err().is_not_found());
}

#[test]
fn test_reset_unlocked_仅保留锁定课程() {
    println!("\n=== 测试：清空未锁定分配 ===");
    let mut store = new_store();

    store.assign("OPT", "X").unwrap();
    store.add_assistant("OPT", "Z").unwrap();
    store.assign("MECH", "Y").unwrap();
    store.assign("ELEC", "W").unwrap();
    store.toggle_lock("OPT").unwrap();
    let locked_before = store.assignment("OPT").unwrap().clone();

    let discarded = store.reset_unlocked();
    assert_eq!(discarded, 2);
    assert_eq!(store.assignment_count(), 1);
    assert_eq!(store.assignment("OPT"), Some(&locked_before));
    assert!(store.assignment("MECH").is_none());
    assert!(store.assignment("ELEC").is_none());
    assert!(store.is_locked("OPT"), "锁定集合不变");
}

// ==========================================
// 休息日
// ==========================================

#[test]
fn test_set_off_day_切换() {
    let mut store = new_store();

    assert!(store.set_off_day("X", Weekday::Mon).unwrap());
    assert!(store.set_off_day("X", Weekday::Fri).unwrap());
    assert_eq!(
        store.off_days("X").into_iter().collect::<Vec<_>>(),
        vec![Weekday::Mon, Weekday::Fri]
    );

    assert!(!store.set_off_day("X", Weekday::Mon).unwrap());
    assert!(!store.set_off_day("X", Weekday::Fri).unwrap());
    assert!(store.off_days("X").is_empty());
    assert!(store.snapshot().preferences.is_empty(), "空偏好不保留");

    assert!(store.set_off_day("NOPE", Weekday::Tue).unwrap_err().is_not_found());
}

#[test]
fn test_catalog_只读共享() {
    let catalog = helpers::catalog_builder::catalog(
        vec![TeacherBuilder::new("T1").build()],
        vec![SubjectBuilder::new("S1").build()],
    );
    let mut store = AssignmentStore::new(catalog.clone());
    store.assign("S1", "T1").unwrap();

    assert_eq!(catalog.subjects().len(), 1);
    assert_eq!(store.catalog().teachers().len(), 1);
}
