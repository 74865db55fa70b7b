// ==========================================
// CatalogImporter 集成测试
// ==========================================
// 测试范围:
// 1. 目录 (teachers.csv + subjects.csv) 导入
// 2. 缺省值: Max_Hours / Id / Is_Merged
// 3. 错误: 文件缺失、格式不支持、重复 ID、字段错误带行号
// ==========================================

use std::fs;
use std::path::Path;
use teaching_load_planner::domain::SubjectType;
use teaching_load_planner::importer::{CatalogImporter, ImportError};
use teaching_load_planner::repository::RepositoryError;

const TEACHERS_CSV: &str = "\
Id,Full Name,Initials,Max_Hours,Department
T1,Asha Rao,AR,16,Physics
T2,\"Shah, Vikram\",VS,,Chemistry
";

const SUBJECTS_CSV: &str = "\
Id,Course,Semester,Subject,Section,Subject_type,\"Hours(Le,Tu,Pr)\",Has_Lab,Students,Department,Is_Merged
PHY101,B.Sc. Physics,1,Mechanics,,DSC,\"3,1,2\",Yes,62,Physics,No
,B.Sc. Chemistry,3,Organic Chemistry,A,dsc,\"3,0,4\",Yes,45,Chemistry,
,,1,Environmental Studies,,AEC,\"2,0,0\",No,120,Chemistry,Yes
";

fn write_catalog_dir(dir: &Path, teachers: &str, subjects: &str) {
    fs::write(dir.join("teachers.csv"), teachers).unwrap();
    fs::write(dir.join("subjects.csv"), subjects).unwrap();
}

#[test]
fn test_import_from_dir_正常导入() {
    println!("\n=== 测试：目录导入 ===");
    let dir = tempfile::tempdir().unwrap();
    write_catalog_dir(dir.path(), TEACHERS_CSV, SUBJECTS_CSV);

    let catalog = CatalogImporter::new(18).import(dir.path()).unwrap();

    // 教师
    assert_eq!(catalog.teachers().len(), 2);
    let t2 = catalog.teacher("T2").unwrap();
    assert_eq!(t2.name, "Shah, Vikram");
    assert_eq!(t2.max_hours, 18, "Max_Hours 为空取默认值");

    // 课程 (保持文件顺序)
    let ids: Vec<&str> = catalog
        .subjects()
        .iter()
        .map(|s| s.subject_id.as_str())
        .collect();
    assert_eq!(
        ids,
        vec![
            "PHY101",
            "B.Sc. Chemistry/S3/Organic Chemistry/A",
            "/S1/Environmental Studies",
        ]
    );

    let mechanics = catalog.subject("PHY101").unwrap();
    assert_eq!((mechanics.le, mechanics.tu, mechanics.pr), (3, 1, 2));
    assert!(mechanics.has_lab);
    assert_eq!(mechanics.students, 62);
    assert_eq!(mechanics.subject_type, SubjectType::Dsc);
    assert_eq!(mechanics.section, None);

    let evs = &catalog.subjects()[2];
    assert_eq!(evs.subject_type, SubjectType::Aec);
    assert!(evs.is_merged);
    assert!(!evs.has_lab);
}

#[test]
fn test_import_缺少文件() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("teachers.csv"), TEACHERS_CSV).unwrap();

    let err = CatalogImporter::new(16).import(dir.path()).unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));

    let err = CatalogImporter::new(16)
        .import(Path::new("/nonexistent/catalog.xlsx"))
        .unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));
}

#[test]
fn test_import_格式不支持() {
    let file = tempfile::Builder::new().suffix(".ods").tempfile().unwrap();
    let err = CatalogImporter::new(16).import(file.path()).unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedFormat(_)));
}

#[test]
fn test_import_重复教师ID() {
    let dir = tempfile::tempdir().unwrap();
    write_catalog_dir(
        dir.path(),
        "Id,Full Name,Initials,Max_Hours,Department\nT1,A,A,16,X\nT1,B,B,16,X\n",
        SUBJECTS_CSV,
    );

    let err = CatalogImporter::new(16).import(dir.path()).unwrap_err();
    assert!(matches!(
        err,
        ImportError::Catalog(RepositoryError::UniqueConstraintViolation(_))
    ));
}

#[test]
fn test_import_字段错误带行号() {
    let dir = tempfile::tempdir().unwrap();
    write_catalog_dir(
        dir.path(),
        TEACHERS_CSV,
        "Id,Course,Semester,Subject,Section,Subject_type,\"Hours(Le,Tu,Pr)\",Has_Lab,Students,Department,Is_Merged\n\
         S1,B.A. History,1,Ancient India,,DSC,\"3,1,0\",No,40,History,No\n\
         S2,B.A. History,1,Medieval India,,XYZ,\"3,1,0\",No,40,History,No\n",
    );

    let err = CatalogImporter::new(16).import(dir.path()).unwrap_err();
    match err {
        ImportError::TypeConversionError { row, field, .. } => {
            assert_eq!(row, 3);
            assert_eq!(field, "Subject_type");
        }
        other => panic!("意外错误: {:?}", other),
    }
}

#[test]
fn test_import_空行后的字段错误行号() {
    let dir = tempfile::tempdir().unwrap();
    write_catalog_dir(
        dir.path(),
        TEACHERS_CSV,
        "Id,Course,Semester,Subject,Section,Subject_type,\"Hours(Le,Tu,Pr)\",Has_Lab,Students,Department,Is_Merged\n\
         S1,B.A. History,1,Ancient India,,DSC,\"3,1,0\",No,40,History,No\n\
         \n\
         ,,,,,,,,,,\n\
         S2,B.A. History,1,Medieval India,,DSC,\"3,1\",No,40,History,No\n",
    );

    let err = CatalogImporter::new(16).import(dir.path()).unwrap_err();
    match err {
        ImportError::TypeConversionError { row, field, .. } => {
            assert_eq!(row, 5, "行号应指向源文件中的实际行");
            assert_eq!(field, "Hours(Le,Tu,Pr)");
        }
        other => panic!("意外错误: {:?}", other),
    }
}
